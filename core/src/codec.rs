//! Self-describing share tokens.
//!
//! A token is the integer whose hexadecimal digit string reads
//!
//! ```text
//! F…F 0 <total> <threshold> <index> <value>
//! ```
//!
//! The leading run of `F`s has one symbol per hex digit of `total` and is
//! closed by a single `0`. That run length is the width of the `total`,
//! `threshold` and `index` fields, each zero-padded to it. Everything after
//! the index is the share value, unpadded (a zero value contributes no
//! digits). Because a token always starts with `F`, no information is lost
//! when it is carried as an integer.

use std::{fmt, str::FromStr};

use math::BigUint;
use num_traits::Zero;
use tracing::trace;

use crate::error::{MalformedShareError, ParameterError, Result, SharingError};
use crate::params::ThresholdConfig;
use crate::traits::PointSource;

const RADIX: u32 = 16;
const MAX_DIGIT: u8 = 0xF;
const ZERO_DIGIT: u8 = 0x0;

/// Fixed-width fields of a share token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShareField {
    Total,
    Threshold,
    Index,
}

impl fmt::Display for ShareField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShareField::Total => "total",
            ShareField::Threshold => "threshold",
            ShareField::Index => "index",
        };
        f.write_str(name)
    }
}

/// An encoded share, displayed and parsed as upper-case hexadecimal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EncodedShare(BigUint);

impl EncodedShare {
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    pub fn decode(&self) -> Result<DecodedShare> {
        decode_share(self)
    }
}

impl From<BigUint> for EncodedShare {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl fmt::Display for EncodedShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl FromStr for EncodedShare {
    type Err = SharingError;

    /// Parse a hex token. Case is ignored, as is surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(RADIX)
                    .map(|d| d as u8)
                    .ok_or(MalformedShareError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits.first() {
            None => Err(MalformedShareError::Empty.into()),
            // A leading zero would vanish once the digits become an integer.
            Some(&first) if first != MAX_DIGIT => {
                Err(MalformedShareError::MissingHeaderRun.into())
            }
            Some(_) => Ok(Self(from_digits(&digits))),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EncodedShare {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EncodedShare {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The fields recovered from a share token.
///
/// No relationship between the fields is enforced here; a token only has to
/// be well framed to decode. [`ShareSet`](crate::share_set::ShareSet) checks
/// that the header describes a usable sharing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedShare {
    pub total: u32,
    pub threshold: u32,
    pub index: u32,
    pub value: BigUint,
}

impl DecodedShare {
    /// The `(threshold, total)` pair every share of one sharing agrees on.
    pub fn threshold_config(&self) -> ThresholdConfig {
        ThresholdConfig {
            threshold: self.threshold,
            total: self.total,
        }
    }
}

impl PointSource for DecodedShare {
    fn x(&self) -> u32 {
        self.index
    }

    fn y(&self) -> &BigUint {
        &self.value
    }
}

/// Pack a share and its sharing metadata into one token.
///
/// Fails when `total` is zero or when `threshold` or `index` need more hex
/// digits than `total`.
pub fn encode_share(
    total: u32,
    threshold: u32,
    index: u32,
    value: &BigUint,
) -> Result<EncodedShare> {
    if total == 0 {
        return Err(ParameterError::ZeroTotal.into());
    }
    let total_digits = to_digits(total);
    let width = total_digits.len();

    let mut digits = Vec::with_capacity(4 * width + 1 + value.bits() as usize / 4 + 1);
    digits.extend(std::iter::repeat(MAX_DIGIT).take(width));
    digits.push(ZERO_DIGIT);
    digits.extend(total_digits);
    digits.extend(padded_digits(ShareField::Threshold, threshold, width)?);
    digits.extend(padded_digits(ShareField::Index, index, width)?);
    if !value.is_zero() {
        digits.extend(value.to_radix_be(RADIX));
    }

    Ok(EncodedShare(from_digits(&digits)))
}

/// Unpack a token produced by [`encode_share`].
pub fn decode_share(token: &EncodedShare) -> Result<DecodedShare> {
    let digits = if token.0.is_zero() {
        Vec::new()
    } else {
        token.0.to_radix_be(RADIX)
    };
    Ok(ShareDecoder::new(&digits).run()?)
}

/// Minimal hex digits of `value`, most significant first; empty for zero.
fn to_digits(value: u32) -> Vec<u8> {
    let mut digits = Vec::new();
    let mut rest = value;
    while rest > 0 {
        digits.push((rest % RADIX) as u8);
        rest /= RADIX;
    }
    digits.reverse();
    digits
}

fn padded_digits(
    field: ShareField,
    value: u32,
    width: usize,
) -> Result<Vec<u8>, ParameterError> {
    let digits = to_digits(value);
    if digits.len() > width {
        return Err(ParameterError::FieldTooWide {
            field,
            value,
            width,
        });
    }
    let mut padded = vec![ZERO_DIGIT; width - digits.len()];
    padded.extend(digits);
    Ok(padded)
}

fn from_digits(digits: &[u8]) -> BigUint {
    digits
        .iter()
        .fold(BigUint::zero(), |acc, &d| acc * RADIX + u32::from(d))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    ScanningHeaderRun,
    ExpectingTerminator,
    ReadingTotal,
    ReadingThreshold,
    ReadingIndex,
    ReadingValue,
    Done,
}

/// Walks a token's digits once, learning the field width from the header.
struct ShareDecoder<'a> {
    digits: &'a [u8],
    cursor: usize,
    width: usize,
    state: DecoderState,
    total: u32,
    threshold: u32,
    index: u32,
    value: BigUint,
}

impl<'a> ShareDecoder<'a> {
    fn new(digits: &'a [u8]) -> Self {
        Self {
            digits,
            cursor: 0,
            width: 0,
            state: DecoderState::ScanningHeaderRun,
            total: 0,
            threshold: 0,
            index: 0,
            value: BigUint::zero(),
        }
    }

    fn run(mut self) -> Result<DecodedShare, MalformedShareError> {
        if self.digits.is_empty() {
            return Err(MalformedShareError::Empty);
        }

        loop {
            trace!(state = ?self.state, cursor = self.cursor, "share decoder step");
            self.state = match self.state {
                DecoderState::ScanningHeaderRun => {
                    let run = self
                        .digits
                        .iter()
                        .take_while(|&&d| d == MAX_DIGIT)
                        .count();
                    if run == 0 {
                        return Err(MalformedShareError::MissingHeaderRun);
                    }
                    self.width = run;
                    self.cursor = run;
                    DecoderState::ExpectingTerminator
                }
                DecoderState::ExpectingTerminator => {
                    match self.digits.get(self.cursor) {
                        Some(&ZERO_DIGIT) => {
                            self.cursor += 1;
                            DecoderState::ReadingTotal
                        }
                        _ => return Err(MalformedShareError::MissingTerminator),
                    }
                }
                DecoderState::ReadingTotal => {
                    self.total = self.read_field(ShareField::Total)?;
                    DecoderState::ReadingThreshold
                }
                DecoderState::ReadingThreshold => {
                    self.threshold = self.read_field(ShareField::Threshold)?;
                    DecoderState::ReadingIndex
                }
                DecoderState::ReadingIndex => {
                    self.index = self.read_field(ShareField::Index)?;
                    DecoderState::ReadingValue
                }
                DecoderState::ReadingValue => {
                    self.value = from_digits(&self.digits[self.cursor..]);
                    self.cursor = self.digits.len();
                    DecoderState::Done
                }
                DecoderState::Done => {
                    return Ok(DecodedShare {
                        total: self.total,
                        threshold: self.threshold,
                        index: self.index,
                        value: std::mem::take(&mut self.value),
                    });
                }
            };
        }
    }

    fn read_field(
        &mut self,
        field: ShareField,
    ) -> Result<u32, MalformedShareError> {
        let end = self.cursor + self.width;
        let Some(chunk) = self.digits.get(self.cursor..end) else {
            return Err(MalformedShareError::Truncated {
                field,
                expected: self.width,
                found: self.digits.len() - self.cursor,
            });
        };
        self.cursor = end;

        chunk
            .iter()
            .try_fold(0u32, |acc, &d| {
                acc.checked_mul(RADIX)?.checked_add(u32::from(d))
            })
            .ok_or(MalformedShareError::FieldOverflow(field))
    }
}
