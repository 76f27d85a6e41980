//! Shared vocabulary of the `hashlab` workspace: keys, errors and the structure contract.
pub mod error;
pub use error::*;
pub mod key;
pub use key::*;
pub mod structure;
pub use structure::*;
