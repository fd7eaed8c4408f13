use thiserror::Error;

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Errors raised by field arithmetic.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error("modulus must be at least 2")]
    InvalidModulus,
    #[error("element has no inverse modulo the field prime")]
    NotInvertible,
}
