//! Configurable hash table with interchangeable hash functions and collision strategies.
pub mod collision;
pub mod config;
pub mod engine;
pub mod hashing;
pub mod message;
pub mod table;

pub use engine::*;
pub use hashlab_core::{
    ConfigIssue, ErrorKind, Failure, HashLabError, Key, Missing, Result, Structure,
};
