//! Implements constructors for [`HashTable`].
use crate::collision::CollisionResolver;
use crate::hashing::HashFunction;
use crate::table::{HashTable, Slot};
use hashlab_core::{ConfigIssue, Result};

impl HashTable {
    /// Creates an empty table with `size` slots for keys of `digits` digits.
    ///
    /// The hash function may be left unset and provided later with
    /// [`HashTable::set_function`]; key operations fail until then.
    ///
    /// # Parameters
    ///
    /// - `size`: The number of slots, must be positive.
    /// - `digits`: The exact width of every key, must be positive.
    /// - `function`: The hash function, validated against `digits`.
    /// - `resolver`: The collision resolver.
    pub fn new(
        size: usize,
        digits: usize,
        function: Option<HashFunction>,
        resolver: CollisionResolver,
    ) -> Result<Self> {
        if size == 0 {
            return Err(ConfigIssue::ZeroSize.into());
        }
        if digits == 0 {
            return Err(ConfigIssue::ZeroDigits.into());
        }
        if let Some(function) = &function {
            function.validate(Some(digits))?;
        }
        resolver.validate(Some(digits))?;

        log::debug!(
            "Creating hash table: size={}, digits={}, resolver={}",
            size,
            digits,
            resolver
        );

        Ok(Self {
            size,
            digits,
            slots: Self::empty_slots(size),
            function,
            resolver,
            len: 0,
        })
    }

    pub(crate) fn empty_slots(size: usize) -> Box<[Slot]> {
        vec![Slot::Empty; size].into_boxed_slice()
    }
}
