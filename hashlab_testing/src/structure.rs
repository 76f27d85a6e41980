//! Utilities for testing [`Structure`] implementations.
use crate::generate::{generate_colliding_keys, Generate, KeyParams};
use hashlab_core::{ErrorKind, HashLabError, Key, Structure};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::Debug;

/// What a structure under test is expected to cope with.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// Collisions are resolved rather than reported as [`ErrorKind::CollisionUnresolved`].
    pub resolves_collisions: bool,
    /// Every free slot is reachable from every home address, so a structure with `size` slots
    /// accepts any `size` distinct keys.
    pub probes_every_slot: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            resolves_collisions: true,
            probes_every_slot: true,
        }
    }
}

impl Capabilities {
    /// Whether `err` is an acceptable insert failure for a structure that is `full` or not.
    fn allows(&self, err: &HashLabError, full: bool) -> bool {
        match err.kind() {
            ErrorKind::CollisionUnresolved => !self.resolves_collisions,
            ErrorKind::TableFull => full || !self.probes_every_slot,
            _ => false,
        }
    }
}

/// Table shapes the generated tests run against, as `(size, digits)`.
pub const SHAPES: [(usize, usize); 6] = [(1, 4), (2, 4), (7, 4), (10, 4), (13, 6), (64, 6)];

/// Generates `count` keys for a structure of the given shape, mixing uniform and colliding ones.
pub fn generate_keys<R: Rng>(rng: &mut R, size: usize, digits: usize, count: usize) -> Vec<Key> {
    let params = KeyParams::new(digits);
    let count = count.min(params.num_keys());
    let colliding = generate_colliding_keys(rng, digits, size.max(2), count / 2);
    let mut keys = colliding.into_vec();
    while keys.len() < count {
        let key = Key::generate(rng, &params);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.shuffle(rng);
    keys
}

/// Inserts `keys` one by one, checking that every successful insert is immediately found at
/// the reported address and that failed inserts leave no trace.
///
/// Returns the inserted keys with their addresses.
pub fn test_insert_search<S: Structure + Debug>(
    structure: &mut S,
    keys: &[Key],
    capabilities: Capabilities,
) -> Vec<(Key, usize)> {
    let mut inserted = Vec::new();
    for key in keys {
        let len = structure.len();
        match structure.insert(key.clone()) {
            Ok(address) => {
                assert!(address < structure.size(), "Key: {:?}", key);
                assert_eq!(structure.search(key), Ok(Some(address)), "Key: {:?}", key);
                assert_eq!(structure.len(), len + 1);
                inserted.push((key.clone(), address));
            }
            Err(err) => {
                let full = len >= structure.size();
                assert!(
                    capabilities.allows(&err, full),
                    "Key: {:?}, error: {:?}",
                    key,
                    err
                );
                assert_eq!(err.key(), Some(key.as_str()));
                assert_eq!(structure.search(key), Ok(None), "Key: {:?}", key);
                assert_eq!(structure.len(), len);
            }
        }
    }
    assert_same_keys(structure, &inserted);
    inserted
}

/// Checks that exactly the `inserted` keys are stored, each at its recorded address.
pub fn assert_same_keys<S: Structure + Debug>(structure: &S, inserted: &[(Key, usize)]) {
    assert_eq!(structure.len(), inserted.len(), "{:?}", structure);
    for (key, address) in inserted {
        assert_eq!(
            structure.search(key),
            Ok(Some(*address)),
            "Key: {:?}, structure: {:?}",
            key,
            structure
        );
    }
}

/// Checks that exactly the `keys` are reachable, wherever they are stored.
pub fn assert_reachable<S: Structure + Debug>(structure: &S, keys: &[Key]) {
    assert_eq!(structure.len(), keys.len(), "{:?}", structure);
    for key in keys {
        assert!(
            matches!(structure.search(key), Ok(Some(_))),
            "Key: {:?}, structure: {:?}",
            key,
            structure
        );
    }
}

/// Re-inserting any stored key is rejected with [`ErrorKind::DuplicateKey`] at its address.
pub fn test_duplicates<S: Structure + Debug>(structure: &mut S, inserted: &[(Key, usize)]) {
    for (key, address) in inserted {
        let err = structure.insert(key.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey, "Key: {:?}", key);
        assert_eq!(err.address(), Some(*address), "Key: {:?}", key);
    }
    assert_same_keys(structure, inserted);
}

/// Deletes the `inserted` keys in random order, checking after every delete that the deleted
/// key is gone and the remaining ones are still found where they were.
pub fn test_delete<R: Rng, S: Structure + Debug>(
    rng: &mut R,
    structure: &mut S,
    inserted: &[(Key, usize)],
) {
    let mut remaining = inserted.to_vec();
    remaining.shuffle(rng);

    while let Some((key, address)) = remaining.pop() {
        assert_eq!(structure.delete(&key), Ok(address), "Key: {:?}", key);
        assert_eq!(structure.search(&key), Ok(None), "Key: {:?}", key);
        assert_eq!(
            structure.delete(&key).unwrap_err().kind(),
            ErrorKind::NotFound,
            "Key: {:?}",
            key
        );
        assert_same_keys(structure, &remaining);
    }
    assert!(structure.is_empty());
    assert_eq!(structure.load_factor(), 0.0);
}

/// Fills the structure to capacity; valid only when every slot is reachable.
pub fn test_fill<S: Structure + Debug>(structure: &mut S, keys: &[Key]) {
    assert!(keys.len() >= structure.size());
    for key in &keys[..structure.size()] {
        structure
            .insert(key.clone())
            .unwrap_or_else(|err| panic!("Key: {:?}, error: {:?}", key, err));
    }
    assert_eq!(structure.load_factor(), 1.0);
}

/// Generates a conformance test module for a [`Structure`] factory.
///
/// # Parameters
///
/// - `name`: The name of the generated module.
/// - `factory`: A closure `|size, digits| -> S` building an empty structure.
/// - `capabilities`: Optional [`Capabilities`], defaults to [`Capabilities::default`].
///
/// # Example
///
/// ```ignore
/// generate_structure_tests!(
///     linear,
///     |size, digits| {
///         HashTable::new(size, digits, Some(HashFunction::Mod), CollisionResolver::Linear)
///             .unwrap()
///     }
/// );
/// ```
#[macro_export]
macro_rules! generate_structure_tests {
    ($name:ident, $factory:expr $(,)?) => {
        $crate::generate_structure_tests!($name, $factory, $crate::Capabilities::default());
    };
    ($name:ident, $factory:expr, $capabilities:expr $(,)?) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;
            use $crate::rand::SeedableRng;
            use $crate::rand_chacha::ChaCha20Rng;
            use $crate::*;

            fn build(
                size: usize,
                digits: usize,
            ) -> impl $crate::hashlab_core::Structure + std::fmt::Debug {
                let factory = $factory;
                factory(size, digits)
            }

            #[test]
            fn test_inserted_keys_are_found() {
                let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
                for (size, digits) in SHAPES {
                    let mut structure = build(size, digits);
                    let keys = generate_keys(&mut rng, size, digits, size + size / 2);
                    test_insert_search(&mut structure, &keys, $capabilities);
                }
            }

            #[test]
            fn test_duplicate_insert() {
                let mut rng = ChaCha20Rng::seed_from_u64(0x5eed + 1);
                for (size, digits) in SHAPES {
                    let mut structure = build(size, digits);
                    let keys = generate_keys(&mut rng, size, digits, size);
                    let inserted = test_insert_search(&mut structure, &keys, $capabilities);
                    test_duplicates(&mut structure, &inserted);
                }
            }

            #[test]
            fn test_insert_delete_search() {
                let mut rng = ChaCha20Rng::seed_from_u64(0x5eed + 2);
                for (size, digits) in SHAPES {
                    let mut structure = build(size, digits);
                    let keys = generate_keys(&mut rng, size, digits, size);
                    let inserted = test_insert_search(&mut structure, &keys, $capabilities);
                    test_delete(&mut rng, &mut structure, &inserted);
                }
            }

            #[test]
            fn test_reinsert_after_delete() {
                let mut rng = ChaCha20Rng::seed_from_u64(0x5eed + 3);
                for (size, digits) in SHAPES {
                    let mut structure = build(size, digits);
                    let keys = generate_keys(&mut rng, size, digits, size);
                    let inserted = test_insert_search(&mut structure, &keys, $capabilities);
                    test_delete(&mut rng, &mut structure, &inserted);
                    test_insert_search(&mut structure, &keys, $capabilities);
                }
            }

            #[test]
            fn test_fill_to_capacity() {
                let capabilities: Capabilities = $capabilities;
                if !(capabilities.resolves_collisions && capabilities.probes_every_slot) {
                    return;
                }
                let mut rng = ChaCha20Rng::seed_from_u64(0x5eed + 4);
                for (size, digits) in SHAPES {
                    let mut structure = build(size, digits);
                    let keys = generate_keys(&mut rng, size, digits, size);
                    test_fill(&mut structure, &keys);
                }
            }
        }
    };
}
