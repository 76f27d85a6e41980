//! Implements the collision resolver swap of [`HashTable`].
use crate::collision::CollisionResolver;
use crate::table::HashTable;
use hashlab_core::{HashLabError, Missing, Result};

impl HashTable {
    /// Replaces the collision resolver, rehashing every stored key under it.
    ///
    /// Keys are extracted in ascending slot order (bucket members in bucket order) and
    /// reinserted into a fresh slot array through the regular insert path. The new array
    /// replaces the old one only once every key has been placed; on failure the error of the
    /// first key that could not be placed is returned and the table keeps its previous slots
    /// and resolver.
    ///
    /// Tombstones never survive the swap, even on an empty table.
    pub fn set_resolver(&mut self, resolver: CollisionResolver) -> Result<()> {
        resolver.validate(Some(self.digits))?;

        let mut slots = Self::empty_slots(self.size);
        if !self.is_empty() {
            let function = self
                .function
                .as_ref()
                .ok_or(HashLabError::Unconfigured(Missing::HashFunction))?;

            log::debug!(
                "Migrating {} keys from {} to {}",
                self.len,
                self.resolver,
                resolver
            );

            for key in self.keys() {
                let home = function.address(key, self.size);
                Self::place(&mut slots, &resolver, home, key.clone())?;
            }
        }

        log::debug!("Collision resolver set to {}", resolver);
        self.slots = slots;
        self.resolver = resolver;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::collision::CollisionResolver;
    use crate::hashing::HashFunction;
    use crate::table::{HashTable, Slot};
    use hashlab_core::{ErrorKind, HashLabError, Key};

    fn key(raw: &str) -> Key {
        Key::parse(raw, 4).unwrap()
    }

    fn table(size: usize, resolver: CollisionResolver, keys: &[&str]) -> HashTable {
        let mut table = HashTable::new(size, 4, Some(HashFunction::Mod), resolver).unwrap();
        for raw in keys {
            table.insert(key(raw)).unwrap();
        }
        table
    }

    #[test]
    fn test_linear_to_chaining() {
        let mut table = table(10, CollisionResolver::Linear, &["1234", "1244"]);
        table.delete(&key("1234")).unwrap();
        assert_eq!(table.search(&key("1244")).unwrap(), Some(5));

        table.set_resolver(CollisionResolver::Chaining).unwrap();
        assert_eq!(table.slots()[4], Slot::Bucket(vec![key("1244")]));
        assert_eq!(table.slots()[5], Slot::Empty);
        assert_eq!(table.search(&key("1244")).unwrap(), Some(4));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_chaining_to_linear_keeps_extraction_order() {
        let mut table = table(
            10,
            CollisionResolver::Chaining,
            &["1244", "1234", "0005", "1254"],
        );
        table.set_resolver(CollisionResolver::Linear).unwrap();

        // Bucket 4 is extracted first in insertion order, then 0005 from slot 5.
        assert_eq!(table.slots()[4], Slot::Occupied(key("1244")));
        assert_eq!(table.slots()[5], Slot::Occupied(key("1234")));
        assert_eq!(table.slots()[6], Slot::Occupied(key("1254")));
        assert_eq!(table.slots()[7], Slot::Occupied(key("0005")));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_failed_migration_leaves_table_untouched() {
        let mut table = table(4, CollisionResolver::Linear, &["0000", "0004", "0008"]);
        let before = table.slots().to_vec();

        // Quadratic probing from home 0 only reaches addresses 0 and 1 in a 4-slot table.
        let err = table.set_resolver(CollisionResolver::Quadratic).unwrap_err();
        assert_eq!(err, HashLabError::TableFull { key: key("0008") });
        assert_eq!(table.slots(), &before[..]);
        assert_eq!(*table.resolver(), CollisionResolver::Linear);

        let err = table.set_resolver(CollisionResolver::None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CollisionUnresolved);
        assert_eq!(err.address(), Some(0));
        assert_eq!(table.slots(), &before[..]);
    }

    #[test]
    fn test_swap_on_empty_table_clears_tombstones() {
        let mut table = table(10, CollisionResolver::Linear, &["1234"]);
        table.delete(&key("1234")).unwrap();
        assert_eq!(table.slots()[4], Slot::Tombstone);

        table
            .set_resolver(CollisionResolver::DoubleHash {
                secondary: HashFunction::MidSquare,
            })
            .unwrap();
        assert!(table.slots().iter().all(|slot| *slot == Slot::Empty));
    }

    #[test]
    fn test_migration_preserves_keys() {
        use hashlab_testing::{assert_reachable, generate_keys};
        use rand::seq::SliceRandom;
        use rand::SeedableRng;
        use rand_chacha::ChaCha20Rng;

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for size in [1, 5, 10, 31] {
            let keys = generate_keys(&mut rng, size, 4, size);
            for _ in 0..8 {
                let mut order = keys.clone();
                order.shuffle(&mut rng);

                let mut table =
                    HashTable::new(size, 4, Some(HashFunction::Mod), CollisionResolver::Linear)
                        .unwrap();
                for key in &order {
                    table.insert(key.clone()).unwrap();
                }

                table.set_resolver(CollisionResolver::Chaining).unwrap();
                assert_reachable(&table, &keys);
                for key in &keys {
                    let home = HashFunction::Mod.address(key, size);
                    assert_eq!(table.search(key).unwrap(), Some(home));
                }

                table.set_resolver(CollisionResolver::Linear).unwrap();
                assert_reachable(&table, &keys);
            }
        }
    }

    #[test]
    fn test_resolver_swap_unblocks_collision() {
        let mut table = table(10, CollisionResolver::None, &["1234"]);
        let err = table.insert(key("1244")).unwrap_err();
        assert!(err.is_recoverable());

        table.set_resolver(CollisionResolver::Quadratic).unwrap();
        assert_eq!(table.insert(key("1244")).unwrap(), 5);
        assert_eq!(table.insert(key("1254")).unwrap(), 8);
    }
}
