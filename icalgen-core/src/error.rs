//! Error types for icalgen.
//!
//! Schema validation failures are not errors: they are reported through
//! [`crate::validate::ValidationResult`]. These variants cover caller misuse,
//! broken schema definitions and internal encoding invariants.

use thiserror::Error;

/// Errors that can occur while generating a calendar.
#[derive(Error, Debug)]
pub enum IcalGenError {
    #[error("Contract violation: {0}")]
    Contract(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),
}

/// Result type alias for icalgen operations.
pub type IcalGenResult<T> = Result<T, IcalGenError>;
