//! Hash functions mapping fixed-width decimal keys to table addresses.
use crate::hashing::common::{digits_mod, mid_square_mod, padded_group_mod};
use hashlab_core::{ConfigIssue, Key, Result};
use std::fmt::{Display, Formatter};

/// Hash function selecting the home address of a key.
///
/// All variants are pure and deterministic. The value a function produces for a key is reduced
/// modulo the table size by [`HashFunction::address`]; double hashing additionally reduces the
/// same value modulo `size - 1` through [`HashFunction::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashFunction {
    /// The numeric value of the key.
    Mod,
    /// Two digits from the middle of the square of the key.
    MidSquare,
    /// A number assembled from selected digits of the key.
    Truncation(Truncation),
    /// Digit groups of the key combined with an arithmetic operation.
    Folding {
        group_size: usize,
        operation: FoldOperation,
    },
}

/// Digit selection for [`HashFunction::Truncation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Truncation {
    /// 1-based positions concatenated in the listed order. Positions may repeat.
    Positions(Vec<usize>),
    /// The first `n` digits.
    Leading(usize),
}

/// How [`HashFunction::Folding`] combines digit groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FoldOperation {
    #[default]
    Sum,
    Mul,
}

impl HashFunction {
    /// Creates a truncation function over 1-based digit `positions`.
    pub fn truncation_positions(positions: Vec<usize>) -> Result<Self> {
        let function = HashFunction::Truncation(Truncation::Positions(positions));
        function.validate(None)?;
        Ok(function)
    }

    /// Creates a truncation function over the first `count` digits.
    pub fn truncation_leading(count: usize) -> Result<Self> {
        let function = HashFunction::Truncation(Truncation::Leading(count));
        function.validate(None)?;
        Ok(function)
    }

    /// Creates a folding function over groups of `group_size` digits.
    pub fn folding(group_size: usize, operation: FoldOperation) -> Result<Self> {
        let function = HashFunction::Folding {
            group_size,
            operation,
        };
        function.validate(None)?;
        Ok(function)
    }

    /// Checks the parameters of the function.
    ///
    /// When `digits` is known, digit positions and counts are also checked against the key
    /// width.
    pub fn validate(&self, digits: Option<usize>) -> Result<()> {
        match self {
            HashFunction::Mod | HashFunction::MidSquare => Ok(()),
            HashFunction::Truncation(Truncation::Positions(positions)) => {
                if positions.is_empty() {
                    return Err(ConfigIssue::NoPositions.into());
                }
                for &position in positions {
                    if position == 0 {
                        return Err(ConfigIssue::ZeroPosition.into());
                    }
                    if let Some(digits) = digits.filter(|&digits| position > digits) {
                        return Err(ConfigIssue::PositionOutOfRange { position, digits }.into());
                    }
                }
                Ok(())
            }
            HashFunction::Truncation(Truncation::Leading(count)) => {
                if *count == 0 {
                    return Err(ConfigIssue::ZeroCount.into());
                }
                match digits {
                    Some(digits) if *count > digits => Err(ConfigIssue::CountOutOfRange {
                        count: *count,
                        digits,
                    }
                    .into()),
                    _ => Ok(()),
                }
            }
            HashFunction::Folding { group_size, .. } => {
                if *group_size == 0 {
                    return Err(ConfigIssue::ZeroGroupSize.into());
                }
                Ok(())
            }
        }
    }

    /// Hashes `key` and reduces the result modulo `modulus`.
    ///
    /// The function must have been validated against the width of `key`.
    pub fn reduce(&self, key: &Key, modulus: usize) -> usize {
        debug_assert!(modulus > 0, r#""modulus" must be positive"#);
        match self {
            HashFunction::Mod => digits_mod(key.digits(), modulus),
            HashFunction::MidSquare => {
                let digits: Vec<u8> = key.digits().collect();
                mid_square_mod(&digits, modulus)
            }
            HashFunction::Truncation(Truncation::Positions(positions)) => {
                let digits: Vec<u8> = key.digits().collect();
                debug_assert!(positions.iter().all(|&p| p >= 1 && p <= digits.len()));
                digits_mod(
                    positions
                        .iter()
                        .map(|&p| digits.get(p.wrapping_sub(1)).copied().unwrap_or(0)),
                    modulus,
                )
            }
            HashFunction::Truncation(Truncation::Leading(count)) => {
                digits_mod(key.digits().take(*count), modulus)
            }
            HashFunction::Folding {
                group_size,
                operation,
            } => {
                let digits: Vec<u8> = key.digits().collect();
                let m = modulus as u128;
                let groups = digits
                    .chunks(*group_size)
                    .map(|group| padded_group_mod(group, *group_size, modulus) as u128);
                let folded = match operation {
                    FoldOperation::Sum => groups.fold(0, |acc, g| (acc + g) % m),
                    FoldOperation::Mul => groups.fold(1 % m, |acc, g| acc * g % m),
                };
                folded as usize
            }
        }
    }

    /// Home address of `key` in a table with `size` slots.
    #[inline]
    pub fn address(&self, key: &Key, size: usize) -> usize {
        self.reduce(key, size)
    }
}

impl Display for HashFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HashFunction::Mod => f.write_str("mod"),
            HashFunction::MidSquare => f.write_str("mid-square"),
            HashFunction::Truncation(Truncation::Positions(positions)) => {
                write!(f, "truncation(positions={:?})", positions)
            }
            HashFunction::Truncation(Truncation::Leading(count)) => {
                write!(f, "truncation(leading={})", count)
            }
            HashFunction::Folding {
                group_size,
                operation,
            } => write!(f, "folding(group_size={}, {})", group_size, operation),
        }
    }
}

impl Display for FoldOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FoldOperation::Sum => f.write_str("sum"),
            FoldOperation::Mul => f.write_str("mul"),
        }
    }
}
