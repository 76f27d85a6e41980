//! Fixed-width decimal keys.
use crate::error::{HashLabError, Result};
use std::fmt::{Debug, Display, Formatter};

/// A validated key: a string of exactly `width` ASCII decimal digits.
///
/// Leading zeros count towards the width but not towards the numeric value, so `"0042"` is a
/// valid 4-digit key whose numeric value is `42`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Key(Box<str>);

impl Key {
    /// Validates `raw` as a key of exactly `digits` decimal digits.
    ///
    /// No padding is performed: `"42"` is not a valid 4-digit key.
    pub fn parse(raw: &str, digits: usize) -> Result<Self> {
        if raw.len() != digits || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HashLabError::InvalidKey {
                key: raw.to_owned(),
                digits,
            });
        }
        Ok(Self(raw.into()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits in the key.
    #[inline]
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Numeric values of the digits, most significant first.
    #[inline]
    pub fn digits(&self) -> impl DoubleEndedIterator<Item = u8> + ExactSizeIterator + '_ {
        self.0.bytes().map(|b| b - b'0')
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Key").field(&self.as_str()).finish()
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
