//! Core trait declarations for addressable search structures.
use crate::error::Result;
use crate::key::Key;

/// A fixed-capacity structure that stores fixed-width decimal [`Key`]s at integer addresses.
///
/// Hash tables implement it, and so could other addressing schemes such as digital or residue
/// trees. Addresses are 0-based and always lie in `[0, size)`.
pub trait Structure {
    /// Capacity of the structure (number of addressable slots).
    fn size(&self) -> usize;

    /// Width every key stored in the structure must have.
    fn digits(&self) -> usize;

    /// Store `key` and return the address it ended up at.
    fn insert(&mut self, key: Key) -> Result<usize>;

    /// Find the address holding `key`.
    ///
    /// `Ok(None)` means the key is absent; errors are reserved for misconfiguration and invalid
    /// keys.
    fn search(&self, key: &Key) -> Result<Option<usize>>;

    /// Remove `key` and return the address it was removed from.
    fn delete(&mut self, key: &Key) -> Result<usize>;

    /// Get the number of keys in the structure.
    fn len(&self) -> usize;

    /// Check if the structure holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the load factor of the structure.
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.size() as f64
    }
}
