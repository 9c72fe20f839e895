pub mod assembler;
pub mod fileio;
pub mod machine;

/// Marker for the crate's error enums; everything that can surface to a
/// caller implements `Display` (deferring to `Debug`).
pub trait CrumbError: std::fmt::Display {}
