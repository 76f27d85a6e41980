//! Stateful front of the crate: configuration plus at most one live table.
use crate::collision::CollisionResolver;
use crate::hashing::HashFunction;
use crate::table::{HashTable, TableState};
use hashlab_core::{HashLabError, Key, Missing, Result};

/// Dimensions of a freshly created table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableShape {
    pub size: usize,
    pub digits: usize,
}

/// Result of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Inserted {
    pub position: Vec<usize>,
    pub value: Key,
}

/// Result of a search. An empty `position` means the key is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchResult {
    pub position: Vec<usize>,
    pub value: Key,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        !self.position.is_empty()
    }
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Deleted {
    pub position: Vec<usize>,
    pub value: Key,
}

/// Owns the configured hash function and collision resolver, and the table built from them.
///
/// The configuration can be set before or after [`Engine::create`]: a new hash function applies
/// to subsequent operations only, while a new resolver migrates every stored key.
///
/// # Example
///
/// ```
/// use hashlab::collision::CollisionResolver;
/// use hashlab::hashing::HashFunction;
/// use hashlab::Engine;
///
/// let mut engine = Engine::new();
/// engine.create(10, 4).unwrap();
/// engine.set_hash(HashFunction::Mod).unwrap();
///
/// assert_eq!(engine.insert("1234").unwrap().position, vec![4]);
/// assert!(engine.insert("1244").unwrap_err().is_recoverable());
///
/// engine.set_collision(CollisionResolver::Linear).unwrap();
/// assert_eq!(engine.insert("1244").unwrap().position, vec![5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    function: Option<HashFunction>,
    resolver: CollisionResolver,
    table: Option<HashTable>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self) -> Option<&HashFunction> {
        self.function.as_ref()
    }

    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    pub fn table(&self) -> Option<&HashTable> {
        self.table.as_ref()
    }

    /// Sets the hash function, validating it against the current table's key width if a table
    /// exists.
    pub fn set_hash(&mut self, function: HashFunction) -> Result<&HashFunction> {
        match &mut self.table {
            Some(table) => table.set_function(function.clone())?,
            None => function.validate(None)?,
        }
        Ok(&*self.function.insert(function))
    }

    /// Sets the collision resolver, migrating the stored keys if a table exists.
    ///
    /// On a failed migration the error of the key that could not be placed is returned and
    /// both the table and the active resolver are left as they were.
    pub fn set_collision(&mut self, resolver: CollisionResolver) -> Result<&CollisionResolver> {
        match &mut self.table {
            Some(table) => table.set_resolver(resolver.clone())?,
            None => resolver.validate(None)?,
        }
        self.resolver = resolver;
        Ok(&self.resolver)
    }

    /// Replaces the table with an empty one of `size` slots for `digits`-digit keys.
    pub fn create(&mut self, size: usize, digits: usize) -> Result<TableShape> {
        let table = HashTable::new(size, digits, self.function.clone(), self.resolver.clone())?;
        self.table = Some(table);
        Ok(TableShape { size, digits })
    }

    pub fn insert(&mut self, raw: &str) -> Result<Inserted> {
        let table = self.table.as_mut().ok_or(HashLabError::Unconfigured(Missing::Table))?;
        let key = parse_key(table, raw)?;
        let address = table.insert(key.clone())?;
        log::debug!("Inserted {} at address {}", key, address);
        Ok(Inserted {
            position: vec![address],
            value: key,
        })
    }

    pub fn search(&self, raw: &str) -> Result<SearchResult> {
        let table = self.table_ref()?;
        let key = parse_key(table, raw)?;
        let position = table.search(&key)?.into_iter().collect();
        Ok(SearchResult {
            position,
            value: key,
        })
    }

    pub fn delete(&mut self, raw: &str) -> Result<Deleted> {
        let table = self.table.as_mut().ok_or(HashLabError::Unconfigured(Missing::Table))?;
        let key = parse_key(table, raw)?;
        let address = table.delete(&key)?;
        log::debug!("Deleted {} from address {}", key, address);
        Ok(Deleted {
            position: vec![address],
            value: key,
        })
    }

    pub fn state(&self) -> Result<TableState> {
        Ok(self.table_ref()?.state())
    }

    fn table_ref(&self) -> Result<&HashTable> {
        self.table
            .as_ref()
            .ok_or(HashLabError::Unconfigured(Missing::Table))
    }
}

/// Parses `raw` for `table`, reporting a missing hash function before a malformed key.
fn parse_key(table: &HashTable, raw: &str) -> Result<Key> {
    if table.function().is_none() {
        return Err(HashLabError::Unconfigured(Missing::HashFunction));
    }
    Key::parse(raw, table.digits())
}
