//! A fixed-size hash table with a pluggable hash function and collision resolver.
mod core;
pub use self::core::*;
mod ctors;
mod migrate;
mod ops;
mod state;
pub use state::*;
mod structure;
