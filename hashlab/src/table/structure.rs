//! Implements [`Structure`] for [`HashTable`].
use crate::table::HashTable;
use hashlab_core::{Key, Result, Structure};

impl Structure for HashTable {
    fn size(&self) -> usize {
        self.size
    }

    fn digits(&self) -> usize {
        self.digits
    }

    fn insert(&mut self, key: Key) -> Result<usize> {
        HashTable::insert(self, key)
    }

    fn search(&self, key: &Key) -> Result<Option<usize>> {
        HashTable::search(self, key)
    }

    fn delete(&mut self, key: &Key) -> Result<usize> {
        HashTable::delete(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }
}
