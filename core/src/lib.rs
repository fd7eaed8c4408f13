//! Threshold secret sharing over a prime field.
//!
//! A secret integer is split into `total` points of a random polynomial of
//! degree `threshold - 1` whose constant term is the secret. Any `threshold`
//! points recover it by Lagrange interpolation at zero; fewer reveal nothing.
//! Each point can be packed into a self-describing token carrying the
//! sharing's `total`, `threshold` and the point's index.
//!
//! Shares are not authenticated. Reconstructing from too few points, or from
//! points of different sharings, silently yields an unrelated value.

pub mod codec;
pub mod error;
pub mod params;
pub mod secret;
pub mod shamir;
pub mod share_set;
pub mod traits;
pub mod utils;

pub use codec::{decode_share, encode_share, DecodedShare, EncodedShare, ShareField};
pub use error::{MalformedShareError, ParameterError, Result, SharingError};
pub use params::{SharingConfig, ThresholdConfig, MAX_SHARES, MERSENNE_127};
pub use shamir::{
    interpolate_at, reconstruct, split, split_secure, ShamirSSS, SharePoint,
};
pub use share_set::ShareSet;
pub use traits::PointSource;
