/// Field extraction, formats, and immediates.
pub mod decode;
