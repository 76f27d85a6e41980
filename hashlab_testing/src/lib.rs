//! Testing utilities shared by the crates of the workspace.
#![allow(dead_code)]

pub mod generate;
pub use generate::*;

pub mod structure;
pub use structure::*;

// Used by the generated tests.
pub use hashlab_core;
pub use rand;
pub use rand_chacha;
