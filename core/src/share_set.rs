//! Collecting decoded shares until a secret can be recovered.

use std::collections::BTreeMap;

use math::BigUint;
use tracing::{debug, warn};

use crate::{
    codec::DecodedShare,
    error::{MalformedShareError, Result, SharingError},
    params::{SharingConfig, ThresholdConfig},
    shamir::{reconstruct, SharePoint},
};

/// Shares gathered for one recovery.
///
/// The first accepted share fixes the sharing's `threshold`-of-`total`
/// header; later shares must carry the same header and an unused index.
/// Rejected shares leave the set untouched.
#[derive(Clone, Debug, Default)]
pub struct ShareSet {
    header: Option<ThresholdConfig>,
    shares: BTreeMap<u32, BigUint>,
}

impl ShareSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header shared by every member, once the first share is in.
    pub fn threshold_config(&self) -> Option<ThresholdConfig> {
        self.header
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Whether at least `threshold` shares have been accepted.
    pub fn is_complete(&self) -> bool {
        self.header
            .is_some_and(|h| self.shares.len() >= h.threshold as usize)
    }

    /// Shares still missing, or `None` before the first share.
    pub fn remaining(&self) -> Option<u32> {
        self.header.map(|h| {
            h.threshold.saturating_sub(self.shares.len() as u32)
        })
    }

    pub fn insert(&mut self, share: DecodedShare) -> Result<()> {
        let found = share.threshold_config();
        let header = match self.header {
            Some(expected) if expected != found => {
                warn!(%expected, %found, "rejecting share from another sharing");
                return Err(SharingError::MismatchedSharingSet {
                    expected,
                    found,
                });
            }
            Some(expected) => expected,
            None => ThresholdConfig::new(found.threshold, found.total)
                .map_err(MalformedShareError::InvalidHeader)?,
        };

        if share.index == 0 || share.index > header.total {
            warn!(index = share.index, "rejecting share with out of range index");
            return Err(MalformedShareError::IndexOutOfRange {
                index: share.index,
                total: header.total,
            }
            .into());
        }
        if self.shares.contains_key(&share.index) {
            warn!(index = share.index, "rejecting duplicate share");
            return Err(SharingError::DuplicateIndex(share.index));
        }

        self.header = Some(header);
        self.shares.insert(share.index, share.value);
        debug!(
            accepted = self.shares.len(),
            threshold = header.threshold,
            "share accepted"
        );
        Ok(())
    }

    /// Accepted shares in index order.
    pub fn points(&self) -> Vec<SharePoint> {
        self.shares
            .iter()
            .map(|(&index, value)| SharePoint::new(index, value.clone()))
            .collect()
    }

    /// Recover the secret from the lowest `threshold` indices in the set.
    pub fn recover(&self, config: &SharingConfig) -> Result<BigUint> {
        let Some(header) = self.header else {
            return Err(SharingError::InsufficientShares {
                required: 1,
                provided: 0,
            });
        };
        if !self.is_complete() {
            return Err(SharingError::InsufficientShares {
                required: header.threshold,
                provided: self.shares.len() as u32,
            });
        }

        let points: Vec<SharePoint> = self
            .points()
            .into_iter()
            .take(header.threshold as usize)
            .collect();
        reconstruct(&points, config)
    }
}

impl Extend<DecodedShare> for ShareSet {
    /// Inserts every share, silently skipping the ones [`ShareSet::insert`]
    /// rejects.
    fn extend<I: IntoIterator<Item = DecodedShare>>(&mut self, iter: I) {
        for share in iter {
            let _ = self.insert(share);
        }
    }
}
