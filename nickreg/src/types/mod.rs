/// Nickname claim and its wire encoding
pub mod claim;
/// Error types for validation and storage
pub mod error;
/// Nickname syntax rules
pub mod nickname;
