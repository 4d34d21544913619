//! Common types and utilities shared by the enumgen crates.
//!
//! - Source spans (`Span`) and line/column lookup (`LineMap`, `Location`)
//! - Go string literal quoting (`quote_go_string`)

pub mod span;
pub use span::Span;

pub mod position;
pub use position::{LineMap, Location};

pub mod quote;
pub use quote::quote_go_string;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
#[cfg(test)]
#[path = "tests/quote_tests.rs"]
mod quote_tests;
