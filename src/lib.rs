//! enumgen: generate enum-like helper methods for sets of Go constants.
//!
//! The pipeline runs leaves first:
//!
//! 1. `scanner` / `parser` read the top-level declarations of each Go file
//! 2. `binder` selects a package's files, binds types and evaluates constants,
//!    and resolves a type name to its constants
//! 3. `emitter` builds the descriptor, renders fragments and assembles output

// Shared spans, positions and Go quoting
pub use enumgen_common as common;

// Go tokens and literal decoding
pub use enumgen_scanner as scanner;

// Declaration parser and build constraints
pub use enumgen_parser as parser;

// Package loading, constant evaluation and enum resolution
pub use enumgen_binder as binder;
pub use enumgen_binder::{BuildContext, EnumResolver, ResolutionError, SymbolTable, load_package};

// Descriptors, fragments and output
pub use enumgen_emitter as emitter;
pub use enumgen_emitter::{EnumDescriptor, FlagMode, RenderConfig, WriteOutcome};

// Tracing subscriber setup for binaries
pub mod tracing_config;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
