//! Snapshots and statistics of a [`HashTable`].
use crate::collision::CollisionResolver;
use crate::hashing::HashFunction;
use crate::table::{HashTable, Slot};
use hashlab_core::Key;

/// Text a tombstone is rendered as in serialized snapshots.
pub const TOMBSTONE: &str = "<deleted>";

/// Index-ordered dump of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableState {
    pub size: usize,
    pub digits: usize,
    pub data: Vec<SlotView>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "display::option"))]
    pub function: Option<HashFunction>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "display::value"))]
    pub resolver: CollisionResolver,
}

/// Snapshot of a single slot.
///
/// Serializes as `null`, [`TOMBSTONE`], the key, or the list of bucket keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotView {
    Empty,
    Tombstone,
    Key(Key),
    Bucket(Vec<Key>),
}

impl From<&Slot> for SlotView {
    fn from(slot: &Slot) -> Self {
        match slot {
            Slot::Empty => SlotView::Empty,
            Slot::Tombstone => SlotView::Tombstone,
            Slot::Occupied(key) => SlotView::Key(key.clone()),
            Slot::Bucket(keys) => SlotView::Bucket(keys.clone()),
        }
    }
}

impl HashTable {
    /// Takes a snapshot of the slots and the active configuration.
    pub fn state(&self) -> TableState {
        TableState {
            size: self.size,
            digits: self.digits,
            data: self.slots.iter().map(SlotView::from).collect(),
            function: self.function.clone(),
            resolver: self.resolver.clone(),
        }
    }

    /// Get the number of keys that collided on insertion.
    ///
    /// A key counts if it sits away from its home address, or behind another key in its
    /// bucket.
    pub fn num_collisions(&self) -> usize {
        let Some(function) = &self.function else {
            return 0;
        };
        self.slots
            .iter()
            .enumerate()
            .map(|(address, slot)| match slot {
                Slot::Occupied(key) => usize::from(function.address(key, self.size) != address),
                Slot::Bucket(keys) => keys.len().saturating_sub(1),
                Slot::Empty | Slot::Tombstone => 0,
            })
            .sum()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SlotView {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SlotView::Empty => serializer.serialize_none(),
            SlotView::Tombstone => serializer.serialize_str(TOMBSTONE),
            SlotView::Key(key) => serializer.serialize_str(key.as_str()),
            SlotView::Bucket(keys) => serializer.collect_seq(keys.iter().map(Key::as_str)),
        }
    }
}

#[cfg(feature = "serde")]
mod display {
    use serde::Serializer;
    use std::fmt::Display;

    pub fn value<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn option<T: Display, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> Key {
        Key::parse(raw, 4).unwrap()
    }

    #[test]
    fn test_state_dump() {
        let mut table =
            HashTable::new(6, 4, Some(HashFunction::Mod), CollisionResolver::Linear).unwrap();
        table.insert(key("1234")).unwrap();
        table.insert(key("1240")).unwrap();
        table.insert(key("0003")).unwrap();
        table.delete(&key("0003")).unwrap();

        let state = table.state();
        assert_eq!(state.size, 6);
        assert_eq!(state.digits, 4);
        assert_eq!(state.function, Some(HashFunction::Mod));
        assert_eq!(state.resolver, CollisionResolver::Linear);
        assert_eq!(
            state.data,
            vec![
                SlotView::Empty,
                SlotView::Empty,
                SlotView::Empty,
                SlotView::Tombstone,
                SlotView::Key(key("1234")),
                SlotView::Key(key("1240")),
            ]
        );
    }

    #[test]
    fn test_state_buckets() {
        let mut table =
            HashTable::new(3, 4, Some(HashFunction::Mod), CollisionResolver::Chaining).unwrap();
        table.insert(key("0003")).unwrap();
        table.insert(key("0006")).unwrap();

        assert_eq!(
            table.state().data,
            vec![
                SlotView::Bucket(vec![key("0003"), key("0006")]),
                SlotView::Empty,
                SlotView::Empty,
            ]
        );
    }

    #[test]
    fn test_num_collisions() {
        let mut table =
            HashTable::new(10, 4, Some(HashFunction::Mod), CollisionResolver::Linear).unwrap();
        for raw in ["1234", "1244", "1254", "0007"] {
            table.insert(key(raw)).unwrap();
        }
        assert_eq!(table.num_collisions(), 2);

        table.set_resolver(CollisionResolver::Chaining).unwrap();
        assert_eq!(table.num_collisions(), 2);

        let no_function = HashTable::new(10, 4, None, CollisionResolver::Linear).unwrap();
        assert_eq!(no_function.num_collisions(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_state_serialization() {
        let mut table =
            HashTable::new(4, 4, Some(HashFunction::Mod), CollisionResolver::Linear).unwrap();
        table.insert(key("0001")).unwrap();
        table.insert(key("0005")).unwrap();
        table.insert(key("0002")).unwrap();
        table.delete(&key("0005")).unwrap();

        let json = serde_json::to_value(table.state()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "size": 4,
                "digits": 4,
                "data": [null, "0001", TOMBSTONE, "0002"],
                "function": "mod",
                "resolver": "linear",
            })
        );
    }
}
