use math::MathError;
use thiserror::Error;

use crate::codec::ShareField;
use crate::params::{ThresholdConfig, MAX_SHARES};

/// Result type specialized for sharing operations.
pub type Result<T, E = SharingError> = std::result::Result<T, E>;

/// Rejected `split`/`encode` arguments. Raised before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParameterError {
    #[error("threshold must be at least 1")]
    ZeroThreshold,
    #[error("total must be at least 1")]
    ZeroTotal,
    #[error(
        "threshold {threshold} exceeds total {total}: secret would be irrecoverable"
    )]
    ThresholdExceedsTotal { threshold: u32, total: u32 },
    #[error("total {0} exceeds the supported maximum of {max} shares", max = MAX_SHARES)]
    TooManyShares(u32),
    #[error("secret does not fit in the field")]
    SecretOutOfRange,
    #[error("prime must be greater than {max}", max = MAX_SHARES)]
    PrimeTooSmall,
    #[error("{field} {value} does not fit in {width} hex digits")]
    FieldTooWide {
        field: ShareField,
        value: u32,
        width: usize,
    },
}

/// A share token that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedShareError {
    #[error("share token is empty")]
    Empty,
    #[error("share token does not start with a length header")]
    MissingHeaderRun,
    #[error("share header is not terminated by `0`")]
    MissingTerminator,
    #[error(
        "share ends inside the {field} field: expected {expected} digits, found {found}"
    )]
    Truncated {
        field: ShareField,
        expected: usize,
        found: usize,
    },
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
    #[error("{0} field exceeds the supported range")]
    FieldOverflow(ShareField),
    #[error("share header describes an invalid sharing: {0}")]
    InvalidHeader(ParameterError),
    #[error("share index {index} is outside 1..={total}")]
    IndexOutOfRange { index: u32, total: u32 },
}

/// Errors that can arise while splitting, encoding or recovering a secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SharingError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("malformed share: {0}")]
    MalformedShare(#[from] MalformedShareError),
    #[error("share belongs to a {found} sharing, expected {expected}")]
    MismatchedSharingSet {
        expected: ThresholdConfig,
        found: ThresholdConfig,
    },
    #[error("duplicate share index {0}")]
    DuplicateIndex(u32),
    #[error("Insufficient shares: need {required}, got {provided}")]
    InsufficientShares { required: u32, provided: u32 },
    #[error(transparent)]
    Math(#[from] MathError),
}
