//! Go code generation for resolved enums.
//!
//! - `EnumDescriptor` - normalized enum with name and value orderings
//! - `RenderConfig` - which fragments to emit
//! - `render` - run the fragment catalog over one descriptor
//! - `assemble` - combine rendered enums into one Go file, optionally formatted
//! - `write_if_changed` - idempotent output

pub mod descriptor;
pub use descriptor::{ConstantValue, EnumDescriptor};

pub mod config;
pub use config::{FlagMode, RenderConfig};

pub mod source_writer;
pub use source_writer::GoWriter;

pub mod fragments;
pub use fragments::{FRAGMENTS, FragmentId, FragmentSpec};

pub mod render;
pub use render::{RenderError, RenderedEnum, render};

pub mod assembler;
pub use assembler::{FormatError, Formatter, GENERATED_MARKER, GoFmt, assemble};

pub mod output;
pub use output::{WriteOutcome, write_if_changed};

#[cfg(test)]
#[path = "tests/descriptor_tests.rs"]
mod descriptor_tests;
#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;
#[cfg(test)]
#[path = "tests/assembler_tests.rs"]
mod assembler_tests;
#[cfg(test)]
#[path = "tests/output_tests.rs"]
mod output_tests;
#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
mod test_fixtures;
