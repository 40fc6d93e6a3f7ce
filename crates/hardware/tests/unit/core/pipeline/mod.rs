/// Branch resolution, squash, and the redirect bubble.
pub mod branches;
