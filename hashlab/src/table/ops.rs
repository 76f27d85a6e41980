//! Implements key operations of [`HashTable`].
use crate::collision::CollisionResolver;
use crate::hashing::HashFunction;
use crate::table::{HashTable, Slot};
use hashlab_core::{HashLabError, Key, Missing, Result};

impl HashTable {
    /// Stores `key` and returns its address.
    ///
    /// # Errors
    ///
    /// - [`HashLabError::Unconfigured`] if no hash function is set.
    /// - [`HashLabError::InvalidKey`] if the key width differs from the table's.
    /// - [`HashLabError::DuplicateKey`] if the key is already stored.
    /// - [`HashLabError::CollisionUnresolved`] if the home address is taken and no resolver is
    ///   configured. The table is unchanged and the same insert can be retried once a resolver
    ///   is set.
    /// - [`HashLabError::TableFull`] if the whole probe sequence is occupied.
    pub fn insert(&mut self, key: Key) -> Result<usize> {
        let home = self.home(&key)?;
        // Keys placed under an earlier hash function may sit off the current probe sequence.
        if let Some(address) = self.slots.iter().position(|slot| slot.holds(&key)) {
            return Err(HashLabError::DuplicateKey { address, key });
        }
        let address = Self::place(&mut self.slots, &self.resolver, home, key)?;
        self.len += 1;
        Ok(address)
    }

    /// Finds the address holding `key`, `None` if the key is absent.
    ///
    /// Without a resolver only the home address is checked.
    pub fn search(&self, key: &Key) -> Result<Option<usize>> {
        let home = self.home(key)?;
        Ok(Self::locate(&self.slots, &self.resolver, home, key))
    }

    /// Removes `key` and returns the address it was stored at.
    ///
    /// Under open addressing the slot becomes a [`Slot::Tombstone`]; an emptied chaining bucket
    /// becomes [`Slot::Empty`].
    pub fn delete(&mut self, key: &Key) -> Result<usize> {
        let home = self.home(key)?;
        let address = Self::locate(&self.slots, &self.resolver, home, key)
            .ok_or_else(|| HashLabError::NotFound { key: key.clone() })?;

        let vacated = match &mut self.slots[address] {
            Slot::Bucket(bucket) => {
                bucket.retain(|k| k != key);
                bucket.is_empty().then_some(Slot::Empty)
            }
            _ => Some(Slot::Tombstone),
        };
        if let Some(vacated) = vacated {
            self.slots[address] = vacated;
        }
        self.len -= 1;
        Ok(address)
    }

    /// Replaces the hash function.
    ///
    /// Stored keys are not moved: the new function only affects subsequent operations.
    pub fn set_function(&mut self, function: HashFunction) -> Result<()> {
        function.validate(Some(self.digits))?;
        log::debug!("Hash function set to {}", function);
        self.function = Some(function);
        Ok(())
    }

    /// Home address of `key` under the current hash function.
    pub fn home(&self, key: &Key) -> Result<usize> {
        let function = self
            .function
            .as_ref()
            .ok_or(HashLabError::Unconfigured(Missing::HashFunction))?;
        if key.width() != self.digits {
            return Err(HashLabError::InvalidKey {
                key: key.as_str().to_owned(),
                digits: self.digits,
            });
        }
        Ok(function.address(key, self.size))
    }

    /// Places `key` whose home address is `home` into `slots` following `resolver`.
    ///
    /// Walks the probe sequence until an empty slot, remembering the first free slot on the
    /// way, so that a key stored past a tombstone is reported as a duplicate rather than
    /// stored twice.
    pub(crate) fn place(
        slots: &mut [Slot],
        resolver: &CollisionResolver,
        home: usize,
        key: Key,
    ) -> Result<usize> {
        if resolver.is_chaining() {
            return match &mut slots[home] {
                Slot::Bucket(bucket) if bucket.contains(&key) => {
                    Err(HashLabError::DuplicateKey { address: home, key })
                }
                Slot::Bucket(bucket) => {
                    bucket.push(key);
                    Ok(home)
                }
                Slot::Occupied(existing) if *existing == key => {
                    Err(HashLabError::DuplicateKey { address: home, key })
                }
                slot @ Slot::Occupied(_) => {
                    let existing = std::mem::take(slot).keys().to_vec();
                    *slot = Slot::Bucket(existing.into_iter().chain([key]).collect());
                    Ok(home)
                }
                slot @ (Slot::Empty | Slot::Tombstone) => {
                    *slot = Slot::Bucket(vec![key]);
                    Ok(home)
                }
            };
        }

        let mut free = None;
        for address in resolver.probe_sequence(&key, home, slots.len()) {
            log::trace!("Probing address {} for key {}", address, key);
            match &slots[address] {
                Slot::Empty => {
                    free.get_or_insert(address);
                    break;
                }
                Slot::Tombstone => {
                    free.get_or_insert(address);
                }
                slot if slot.holds(&key) => {
                    return Err(HashLabError::DuplicateKey { address, key });
                }
                _ if !resolver.is_configured() => {
                    log::debug!("Unresolved collision at address {} for key {}", home, key);
                    return Err(HashLabError::CollisionUnresolved { address: home, key });
                }
                _ => {}
            }
        }

        match free {
            Some(address) => {
                slots[address] = Slot::Occupied(key);
                Ok(address)
            }
            None => Err(HashLabError::TableFull { key }),
        }
    }

    /// Finds `key` in `slots` following `resolver`.
    ///
    /// Tombstones and other keys are skipped, an empty slot ends the search.
    pub(crate) fn locate(
        slots: &[Slot],
        resolver: &CollisionResolver,
        home: usize,
        key: &Key,
    ) -> Option<usize> {
        for address in resolver.probe_sequence(key, home, slots.len()) {
            match &slots[address] {
                Slot::Empty => return None,
                slot if slot.holds(key) => return Some(address),
                _ => {}
            }
        }
        None
    }
}
