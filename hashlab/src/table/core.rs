//! Declares core types for [`HashTable`].
use crate::collision::CollisionResolver;
use crate::hashing::HashFunction;
use hashlab_core::Key;

/// Hash table over fixed-width decimal keys.
///
/// # Guarantees
///
/// - No key is stored twice.
/// - Under open addressing a slot holds at most one key and deleted slots become
///   [`Slot::Tombstone`], so keys that probed past them stay reachable.
/// - Swapping the collision resolver either rebuilds the whole slot array or leaves the table
///   untouched.
///
/// # Examples
///
/// ```rust
/// use hashlab::collision::CollisionResolver;
/// use hashlab::hashing::HashFunction;
/// use hashlab::table::HashTable;
/// use hashlab_core::{ErrorKind, Key};
///
/// let mut table =
///     HashTable::new(10, 4, Some(HashFunction::Mod), CollisionResolver::None).unwrap();
/// let key = |raw| Key::parse(raw, 4).unwrap();
///
/// assert_eq!(table.insert(key("1234")).unwrap(), 4);
///
/// // Same home address and no resolver yet.
/// let err = table.insert(key("1244")).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::CollisionUnresolved);
///
/// table.set_resolver(CollisionResolver::Linear).unwrap();
/// assert_eq!(table.insert(key("1244")).unwrap(), 5);
/// assert_eq!(table.search(&key("1244")).unwrap(), Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct HashTable {
    pub(crate) size: usize,
    pub(crate) digits: usize,
    pub(crate) slots: Box<[Slot]>,
    pub(crate) function: Option<HashFunction>,
    pub(crate) resolver: CollisionResolver,
    pub(crate) len: usize,
}

/// A single addressable cell of a [`HashTable`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    /// Never used since the slot array was built.
    #[default]
    Empty,
    /// Used and then vacated by a delete under open addressing.
    Tombstone,
    Occupied(Key),
    /// Keys sharing the home address under chaining, in insertion order.
    Bucket(Vec<Key>),
}

impl Slot {
    /// Whether a key can be placed here.
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, Slot::Empty | Slot::Tombstone)
    }

    /// Keys stored in the slot.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        match self {
            Slot::Occupied(key) => std::slice::from_ref(key),
            Slot::Bucket(keys) => keys,
            Slot::Empty | Slot::Tombstone => &[],
        }
    }

    #[inline]
    pub fn holds(&self, key: &Key) -> bool {
        self.keys().contains(key)
    }
}

impl HashTable {
    /// Number of slots.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Width of the keys the table accepts.
    #[inline]
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.size as f64
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub fn function(&self) -> Option<&HashFunction> {
        self.function.as_ref()
    }

    #[inline]
    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    /// Stored keys in ascending slot order, bucket members in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.slots.iter().flat_map(|slot| slot.keys())
    }
}
