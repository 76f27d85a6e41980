//! Hash functions over fixed-width decimal keys and the digit arithmetic behind them.
pub mod common;
mod function;
pub use function::*;
