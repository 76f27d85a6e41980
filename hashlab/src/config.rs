//! Configuration records as received from a transport layer.
//!
//! The records carry a kind plus optional parameters. Converting them into [`HashFunction`] and
//! [`CollisionResolver`] validates that the parameters the kind needs are present.
use crate::collision::CollisionResolver;
use crate::hashing::{FoldOperation, HashFunction, Truncation};
use hashlab_core::{ConfigIssue, HashLabError, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HashFunctionKind {
    Mod,
    #[cfg_attr(feature = "serde", serde(alias = "mid_square"))]
    Square,
    Truncation,
    Folding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CollisionKind {
    None,
    Linear,
    Quadratic,
    #[cfg_attr(feature = "serde", serde(alias = "double_hash"))]
    Double,
    Chaining,
}

fn unknown(what: &'static str, name: &str) -> HashLabError {
    ConfigIssue::UnknownName {
        what,
        name: name.to_owned(),
    }
    .into()
}

impl FromStr for HashFunctionKind {
    type Err = HashLabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mod" => Ok(HashFunctionKind::Mod),
            "square" | "mid_square" | "mid-square" => Ok(HashFunctionKind::Square),
            "truncation" => Ok(HashFunctionKind::Truncation),
            "folding" => Ok(HashFunctionKind::Folding),
            _ => Err(unknown("hash function", s)),
        }
    }
}

impl FromStr for FoldOperation {
    type Err = HashLabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(FoldOperation::Sum),
            "mul" => Ok(FoldOperation::Mul),
            _ => Err(unknown("folding operation", s)),
        }
    }
}

impl FromStr for CollisionKind {
    type Err = HashLabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CollisionKind::None),
            "linear" => Ok(CollisionKind::Linear),
            "quadratic" => Ok(CollisionKind::Quadratic),
            "double" | "double_hash" => Ok(CollisionKind::Double),
            "chaining" => Ok(CollisionKind::Chaining),
            _ => Err(unknown("collision strategy", s)),
        }
    }
}

/// Hash function request.
///
/// - `truncation` needs exactly one of `positions` (1-based) and `count`.
/// - `folding` needs `group_size`; `operation` defaults to `sum`.
/// - Parameters a kind does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashFunctionConfig {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: HashFunctionKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub positions: Option<Vec<usize>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub count: Option<usize>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub group_size: Option<usize>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub operation: Option<FoldOperation>,
}

impl HashFunctionConfig {
    /// A request for `kind` with no parameters.
    pub fn new(kind: HashFunctionKind) -> Self {
        Self {
            kind,
            positions: None,
            count: None,
            group_size: None,
            operation: None,
        }
    }
}

impl TryFrom<HashFunctionConfig> for HashFunction {
    type Error = HashLabError;

    fn try_from(config: HashFunctionConfig) -> Result<Self> {
        match config.kind {
            HashFunctionKind::Mod => Ok(HashFunction::Mod),
            HashFunctionKind::Square => Ok(HashFunction::MidSquare),
            HashFunctionKind::Truncation => match (config.positions, config.count) {
                (Some(_), Some(_)) => {
                    Err(ConfigIssue::ConflictingParameters("positions", "count").into())
                }
                (Some(positions), None) => HashFunction::truncation_positions(positions),
                (None, Some(count)) => HashFunction::truncation_leading(count),
                (None, None) => Err(ConfigIssue::MissingParameter("positions").into()),
            },
            HashFunctionKind::Folding => {
                let group_size = config
                    .group_size
                    .ok_or(ConfigIssue::MissingParameter("group_size"))?;
                HashFunction::folding(group_size, config.operation.unwrap_or_default())
            }
        }
    }
}

impl From<&HashFunction> for HashFunctionConfig {
    fn from(function: &HashFunction) -> Self {
        match function {
            HashFunction::Mod => Self::new(HashFunctionKind::Mod),
            HashFunction::MidSquare => Self::new(HashFunctionKind::Square),
            HashFunction::Truncation(Truncation::Positions(positions)) => Self {
                positions: Some(positions.clone()),
                ..Self::new(HashFunctionKind::Truncation)
            },
            HashFunction::Truncation(Truncation::Leading(count)) => Self {
                count: Some(*count),
                ..Self::new(HashFunctionKind::Truncation)
            },
            HashFunction::Folding {
                group_size,
                operation,
            } => Self {
                group_size: Some(*group_size),
                operation: Some(*operation),
                ..Self::new(HashFunctionKind::Folding)
            },
        }
    }
}

/// Collision strategy request. `double` needs a `secondary` hash function.
///
/// When decoded, `secondary` (also accepted as `second_hash` or `second_hash_type`) may be a
/// full hash function request or just its kind, e.g. `"mod"`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionConfig {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: CollisionKind,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "second_hash",
            alias = "second_hash_type",
            deserialize_with = "secondary::deserialize",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub secondary: Option<HashFunctionConfig>,
}

#[cfg(feature = "serde")]
mod secondary {
    use super::{HashFunctionConfig, HashFunctionKind};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Secondary {
        Kind(HashFunctionKind),
        Config(HashFunctionConfig),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<HashFunctionConfig>, D::Error> {
        let secondary = Option::<Secondary>::deserialize(deserializer)?;
        Ok(secondary.map(|secondary| match secondary {
            Secondary::Kind(kind) => HashFunctionConfig::new(kind),
            Secondary::Config(config) => config,
        }))
    }
}

impl CollisionConfig {
    pub fn new(kind: CollisionKind) -> Self {
        Self {
            kind,
            secondary: None,
        }
    }

    /// A double hashing request with the given secondary function.
    pub fn double(secondary: HashFunctionConfig) -> Self {
        Self {
            kind: CollisionKind::Double,
            secondary: Some(secondary),
        }
    }
}

impl TryFrom<CollisionConfig> for CollisionResolver {
    type Error = HashLabError;

    fn try_from(config: CollisionConfig) -> Result<Self> {
        match config.kind {
            CollisionKind::None => Ok(CollisionResolver::None),
            CollisionKind::Linear => Ok(CollisionResolver::Linear),
            CollisionKind::Quadratic => Ok(CollisionResolver::Quadratic),
            CollisionKind::Chaining => Ok(CollisionResolver::Chaining),
            CollisionKind::Double => {
                let secondary = config
                    .secondary
                    .ok_or(ConfigIssue::MissingParameter("secondary"))?;
                Ok(CollisionResolver::DoubleHash {
                    secondary: secondary.try_into()?,
                })
            }
        }
    }
}

impl From<&CollisionResolver> for CollisionConfig {
    fn from(resolver: &CollisionResolver) -> Self {
        match resolver {
            CollisionResolver::None => Self::new(CollisionKind::None),
            CollisionResolver::Linear => Self::new(CollisionKind::Linear),
            CollisionResolver::Quadratic => Self::new(CollisionKind::Quadratic),
            CollisionResolver::Chaining => Self::new(CollisionKind::Chaining),
            CollisionResolver::DoubleHash { secondary } => Self::double(secondary.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlab_core::ErrorKind;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("mod".parse::<HashFunctionKind>(), Ok(HashFunctionKind::Mod));
        assert_eq!(" Square ".parse::<HashFunctionKind>(), Ok(HashFunctionKind::Square));
        assert_eq!("mid_square".parse::<HashFunctionKind>(), Ok(HashFunctionKind::Square));
        assert_eq!("FOLDING".parse::<HashFunctionKind>(), Ok(HashFunctionKind::Folding));
        assert_eq!("double".parse::<CollisionKind>(), Ok(CollisionKind::Double));
        assert_eq!("chaining".parse::<CollisionKind>(), Ok(CollisionKind::Chaining));
        assert_eq!("mul".parse::<FoldOperation>(), Ok(FoldOperation::Mul));

        let err = "cuckoo".parse::<CollisionKind>().unwrap_err();
        assert_eq!(
            err,
            HashLabError::InvalidConfig(ConfigIssue::UnknownName {
                what: "collision strategy",
                name: "cuckoo".to_owned()
            })
        );
        assert!("xor".parse::<FoldOperation>().is_err());
        assert!("".parse::<HashFunctionKind>().is_err());
    }

    #[test]
    fn test_hash_function_from_config() {
        let function = HashFunction::try_from(HashFunctionConfig::new(HashFunctionKind::Mod));
        assert_eq!(function, Ok(HashFunction::Mod));

        let config = HashFunctionConfig {
            positions: Some(vec![2, 4]),
            ..HashFunctionConfig::new(HashFunctionKind::Truncation)
        };
        assert_eq!(
            HashFunction::try_from(config),
            Ok(HashFunction::Truncation(Truncation::Positions(vec![2, 4])))
        );

        let config = HashFunctionConfig {
            count: Some(3),
            ..HashFunctionConfig::new(HashFunctionKind::Truncation)
        };
        assert_eq!(
            HashFunction::try_from(config),
            Ok(HashFunction::Truncation(Truncation::Leading(3)))
        );

        let config = HashFunctionConfig {
            group_size: Some(2),
            ..HashFunctionConfig::new(HashFunctionKind::Folding)
        };
        assert_eq!(
            HashFunction::try_from(config),
            Ok(HashFunction::Folding {
                group_size: 2,
                operation: FoldOperation::Sum
            })
        );
    }

    #[test]
    fn test_hash_function_config_errors() {
        let missing = HashFunction::try_from(HashFunctionConfig::new(HashFunctionKind::Folding));
        assert_eq!(
            missing,
            Err(ConfigIssue::MissingParameter("group_size").into())
        );

        let missing = HashFunction::try_from(HashFunctionConfig::new(HashFunctionKind::Truncation));
        assert_eq!(
            missing,
            Err(ConfigIssue::MissingParameter("positions").into())
        );

        let conflicting = HashFunctionConfig {
            positions: Some(vec![1]),
            count: Some(1),
            ..HashFunctionConfig::new(HashFunctionKind::Truncation)
        };
        assert_eq!(
            HashFunction::try_from(conflicting).unwrap_err().kind(),
            ErrorKind::InvalidConfig
        );

        let empty = HashFunctionConfig {
            positions: Some(vec![]),
            ..HashFunctionConfig::new(HashFunctionKind::Truncation)
        };
        assert_eq!(
            HashFunction::try_from(empty),
            Err(ConfigIssue::NoPositions.into())
        );
    }

    #[test]
    fn test_collision_from_config() {
        for (kind, resolver) in [
            (CollisionKind::None, CollisionResolver::None),
            (CollisionKind::Linear, CollisionResolver::Linear),
            (CollisionKind::Quadratic, CollisionResolver::Quadratic),
            (CollisionKind::Chaining, CollisionResolver::Chaining),
        ] {
            assert_eq!(
                CollisionResolver::try_from(CollisionConfig::new(kind)),
                Ok(resolver)
            );
        }

        let config = CollisionConfig::double(HashFunctionConfig::new(HashFunctionKind::Square));
        assert_eq!(
            CollisionResolver::try_from(config),
            Ok(CollisionResolver::DoubleHash {
                secondary: HashFunction::MidSquare
            })
        );

        assert_eq!(
            CollisionResolver::try_from(CollisionConfig::new(CollisionKind::Double)),
            Err(ConfigIssue::MissingParameter("secondary").into())
        );
        // A secondary function still needs its own parameters.
        let config = CollisionConfig::double(HashFunctionConfig::new(HashFunctionKind::Folding));
        assert!(CollisionResolver::try_from(config).is_err());
    }

    #[test]
    fn test_config_from_engine_types() {
        let functions = [
            HashFunction::Mod,
            HashFunction::MidSquare,
            HashFunction::truncation_positions(vec![3, 1]).unwrap(),
            HashFunction::truncation_leading(2).unwrap(),
            HashFunction::folding(3, FoldOperation::Mul).unwrap(),
        ];
        for function in functions {
            let config = HashFunctionConfig::from(&function);
            assert_eq!(HashFunction::try_from(config), Ok(function));
        }

        let resolver = CollisionResolver::DoubleHash {
            secondary: HashFunction::folding(2, FoldOperation::Sum).unwrap(),
        };
        let config = CollisionConfig::from(&resolver);
        assert_eq!(config.kind, CollisionKind::Double);
        assert_eq!(CollisionResolver::try_from(config), Ok(resolver));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_requests() {
        let config: HashFunctionConfig =
            serde_json::from_str(r#"{"type": "folding", "group_size": 2, "operation": "mul"}"#)
                .unwrap();
        assert_eq!(
            HashFunction::try_from(config),
            Ok(HashFunction::Folding {
                group_size: 2,
                operation: FoldOperation::Mul
            })
        );

        let config: CollisionConfig =
            serde_json::from_str(r#"{"type": "double", "second_hash": {"type": "mid_square"}}"#)
                .unwrap();
        assert_eq!(
            CollisionResolver::try_from(config),
            Ok(CollisionResolver::DoubleHash {
                secondary: HashFunction::MidSquare
            })
        );

        assert!(serde_json::from_str::<CollisionConfig>(r#"{"type": "cuckoo"}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_secondary_by_name() {
        let config: CollisionConfig =
            serde_json::from_str(r#"{"type": "double", "second_hash_type": "mod"}"#).unwrap();
        assert_eq!(
            CollisionResolver::try_from(config),
            Ok(CollisionResolver::DoubleHash {
                secondary: HashFunction::Mod
            })
        );

        let config: CollisionConfig =
            serde_json::from_str(r#"{"type": "linear", "second_hash_type": null}"#).unwrap();
        assert_eq!(config, CollisionConfig::new(CollisionKind::Linear));

        // A bare kind carries no parameters, so folding still needs its group size.
        let config: CollisionConfig =
            serde_json::from_str(r#"{"type": "double", "secondary": "folding"}"#).unwrap();
        assert_eq!(
            CollisionResolver::try_from(config),
            Err(ConfigIssue::MissingParameter("group_size").into())
        );

        assert!(serde_json::from_str::<CollisionConfig>(
            r#"{"type": "double", "second_hash_type": "cuckoo"}"#
        )
        .is_err());
    }
}
