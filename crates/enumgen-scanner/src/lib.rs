//! Go source scanner/tokenizer for enumgen.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer with Go's automatic semicolon insertion
//! - `literals` - Decoding of integer, rune and string literal text

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod scanner_impl;
pub use scanner_impl::{ScanError, ScanErrorKind, ScannerState, Token, tokenize};

pub mod literals;
pub use literals::{LiteralError, parse_int_literal, unquote_rune, unquote_string};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
#[cfg(test)]
#[path = "tests/literal_tests.rs"]
mod literal_tests;
