//! Front end configuration.
//!
//! Ceilings a caller applies to untrusted input before lexing and parsing.
//! Defaults come from the environment (`PCL_MAX_SOURCE_BYTES`,
//! `PCL_MAX_TOKENS`) and fall back to the built-in constants.

pub mod limits;

pub use limits::FrontendLimits;
