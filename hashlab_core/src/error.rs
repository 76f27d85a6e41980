//! Error definitions.
use crate::key::Key;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Result type used across the workspace.
pub type Result<T> = std::result::Result<T, HashLabError>;

/// Project-wise error type.
///
/// Every variant carries enough structure ([`HashLabError::kind`], [`HashLabError::address`],
/// [`HashLabError::key`]) for a caller to react without parsing the display text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashLabError {
    /// Rejected hash function, collision resolver or table parameters.
    #[error("Invalid configuration: {0}.")]
    InvalidConfig(#[from] ConfigIssue),

    /// The raw key is not a string of exactly `digits` decimal digits.
    #[error("Key {key:?} must consist of exactly {digits} decimal digits.")]
    InvalidKey { key: String, digits: usize },

    /// The home address of `key` is taken and no collision resolver is configured.
    ///
    /// Recoverable: configure a resolver and retry the same insert.
    #[error("Collision at address {address} for key {key}.")]
    CollisionUnresolved { address: usize, key: Key },

    #[error("Key {key} is already stored at address {address}.")]
    DuplicateKey { address: usize, key: Key },

    /// Every address of the probe sequence is occupied.
    #[error("No free slot left for key {key}.")]
    TableFull { key: Key },

    #[error("Key {key} not found.")]
    NotFound { key: Key },

    /// The operation needs something that has not been set up yet.
    #[error("{0} is not configured.")]
    Unconfigured(Missing),
}

/// Payload-free discriminant of [`HashLabError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ErrorKind {
    InvalidConfig,
    InvalidKey,
    CollisionUnresolved,
    DuplicateKey,
    TableFull,
    NotFound,
    Unconfigured,
}

/// What an [`HashLabError::Unconfigured`] operation was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Missing {
    /// No table has been created.
    Table,
    /// No hash function has been set.
    HashFunction,
}

impl Display for Missing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::Table => f.write_str("Table"),
            Missing::HashFunction => f.write_str("Hash function"),
        }
    }
}

/// Detailed reason of an [`HashLabError::InvalidConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("table size must be positive")]
    ZeroSize,
    #[error("key width must be positive")]
    ZeroDigits,
    #[error("truncation needs at least one position")]
    NoPositions,
    #[error("position {position} is outside of [1, {digits}]")]
    PositionOutOfRange { position: usize, digits: usize },
    #[error("positions are 1-based, 0 is not a valid position")]
    ZeroPosition,
    #[error("truncation count must be positive")]
    ZeroCount,
    #[error("truncation count {count} exceeds the key width {digits}")]
    CountOutOfRange { count: usize, digits: usize },
    #[error("group size must be positive")]
    ZeroGroupSize,
    #[error("missing parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("parameters `{0}` and `{1}` are mutually exclusive")]
    ConflictingParameters(&'static str, &'static str),
    #[error("unknown {what} `{name}`")]
    UnknownName { what: &'static str, name: String },
}

impl HashLabError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HashLabError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            HashLabError::InvalidKey { .. } => ErrorKind::InvalidKey,
            HashLabError::CollisionUnresolved { .. } => ErrorKind::CollisionUnresolved,
            HashLabError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            HashLabError::TableFull { .. } => ErrorKind::TableFull,
            HashLabError::NotFound { .. } => ErrorKind::NotFound,
            HashLabError::Unconfigured(_) => ErrorKind::Unconfigured,
        }
    }

    /// Address the error refers to, if any.
    pub fn address(&self) -> Option<usize> {
        match self {
            HashLabError::CollisionUnresolved { address, .. }
            | HashLabError::DuplicateKey { address, .. } => Some(*address),
            _ => None,
        }
    }

    /// Key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            HashLabError::InvalidKey { key, .. } => Some(key),
            HashLabError::CollisionUnresolved { key, .. }
            | HashLabError::DuplicateKey { key, .. }
            | HashLabError::TableFull { key }
            | HashLabError::NotFound { key } => Some(key.as_str()),
            HashLabError::InvalidConfig(_) | HashLabError::Unconfigured(_) => None,
        }
    }

    /// Whether retrying the same operation can succeed after reconfiguring the resolver.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HashLabError::CollisionUnresolved { .. })
    }

    /// Structured `{kind, address, key}` view of the error.
    pub fn failure(&self) -> Failure<'_> {
        Failure {
            kind: self.kind(),
            address: self.address(),
            key: self.key(),
        }
    }
}

/// Transport-friendly view of a [`HashLabError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Failure<'a> {
    pub kind: ErrorKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub address: Option<usize>,
    pub key: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_unresolved_failure() {
        let key = Key::parse("1244", 4).unwrap();
        let err = HashLabError::CollisionUnresolved { address: 4, key };
        assert!(err.is_recoverable());
        assert_eq!(
            err.failure(),
            Failure {
                kind: ErrorKind::CollisionUnresolved,
                address: Some(4),
                key: Some("1244"),
            }
        );
        assert_eq!(err.to_string(), "Collision at address 4 for key 1244.");
    }

    #[test]
    fn test_config_issue_converts() {
        let err: HashLabError = ConfigIssue::PositionOutOfRange {
            position: 7,
            digits: 4,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert_eq!(err.address(), None);
        assert_eq!(err.key(), None);
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: position 7 is outside of [1, 4]."
        );
    }

    #[test]
    fn test_unconfigured_display() {
        assert_eq!(
            HashLabError::Unconfigured(Missing::HashFunction).to_string(),
            "Hash function is not configured."
        );
        assert_eq!(
            HashLabError::Unconfigured(Missing::Table).kind(),
            ErrorKind::Unconfigured
        );
    }
}
