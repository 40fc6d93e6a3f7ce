//! RAM image loader.
//!
//! Reads a flat binary from disk into DRAM starting at address 0. Bytes are packed
//! little-endian into 32-bit words; a trailing partial word is zero padded.

use std::fs;
use std::path::Path;

use crate::common::{Result, SimError};
use crate::soc::memory::DramBuffer;

/// Loads a flat binary image into DRAM.
///
/// # Arguments
///
/// * `path` - Path to the image file.
/// * `dram` - Backing store to write; words past the image keep their fill pattern.
///
/// # Returns
///
/// The number of bytes loaded.
///
/// # Errors
///
/// `SimError::Io` if the file cannot be read, `SimError::ImageTooLarge` if it does
/// not fit.
pub fn load_image(path: impl AsRef<Path>, dram: &mut DramBuffer) -> Result<usize> {
    let path = path.as_ref();
    let image = fs::read(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    dram.load_bytes(&image)?;
    tracing::info!(path = %path.display(), bytes = image.len(), "loaded RAM image");
    Ok(image.len())
}

/// Loads a program given as instruction words.
///
/// # Errors
///
/// `SimError::ImageTooLarge` if the words do not fit.
pub fn load_words(words: &[u32], dram: &mut DramBuffer) -> Result<()> {
    dram.load_words(words)
}
