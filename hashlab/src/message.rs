//! Caller-facing sentences built from operation results and errors.
//!
//! Nothing in the engine depends on these strings; they exist for the boundary layer.
use crate::collision::CollisionResolver;
use crate::engine::{Deleted, Inserted, SearchResult, TableShape};
use crate::hashing::HashFunction;
use hashlab_core::{HashLabError, Missing};

pub fn hash_function_set(function: &HashFunction) -> String {
    format!("Hash function set to {}.", function)
}

pub fn collision_set(resolver: &CollisionResolver) -> String {
    match resolver {
        CollisionResolver::None => "Collision resolution disabled.".to_owned(),
        CollisionResolver::Linear => "Collision strategy set to linear probing.".to_owned(),
        CollisionResolver::Quadratic => "Collision strategy set to quadratic probing.".to_owned(),
        CollisionResolver::DoubleHash { secondary } => format!(
            "Collision strategy set to double hashing with {} as secondary function.",
            secondary
        ),
        CollisionResolver::Chaining => "Collision strategy set to chaining.".to_owned(),
    }
}

pub fn table_created(shape: &TableShape) -> String {
    format!(
        "Table created with {} slots for {}-digit keys.",
        shape.size, shape.digits
    )
}

pub fn inserted(result: &Inserted) -> String {
    format!(
        "Key {} inserted at address {}.",
        result.value,
        addresses(&result.position)
    )
}

pub fn searched(result: &SearchResult) -> String {
    if result.is_found() {
        format!(
            "Key {} found at address {}.",
            result.value,
            addresses(&result.position)
        )
    } else {
        format!("Key {} not found.", result.value)
    }
}

pub fn deleted(result: &Deleted) -> String {
    format!(
        "Key {} deleted from address {}.",
        result.value,
        addresses(&result.position)
    )
}

/// One sentence describing `err`.
///
/// An unresolved collision names the address and key and asks for a strategy, since retrying
/// the same insert afterwards succeeds.
pub fn describe(err: &HashLabError) -> String {
    match err {
        HashLabError::CollisionUnresolved { address, key } => format!(
            "Collision at address {} for key {}. \
             Define a collision resolution strategy and retry the insert.",
            address, key
        ),
        HashLabError::InvalidConfig(issue) => format!("Invalid configuration: {}.", issue),
        HashLabError::InvalidKey { key, digits } => {
            format!("Key {:?} must consist of exactly {} digits.", key, digits)
        }
        HashLabError::DuplicateKey { address, key } => {
            format!("Key {} is already stored at address {}.", key, address)
        }
        HashLabError::TableFull { key } => {
            format!("No free slot left for key {}: the table is full.", key)
        }
        HashLabError::NotFound { key } => format!("Key {} is not in the table.", key),
        HashLabError::Unconfigured(Missing::Table) => {
            "Create the table before working with keys.".to_owned()
        }
        HashLabError::Unconfigured(Missing::HashFunction) => {
            "Define the hash function before working with keys.".to_owned()
        }
    }
}

fn addresses(position: &[usize]) -> String {
    position
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
