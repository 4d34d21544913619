//! Package loading and symbol resolution for enumgen.
//!
//! - `BuildContext` - target GOOS/GOARCH and build tags used for file selection
//! - `load_package` - discover, parse and bind the files of one Go package
//! - `SymbolTable` - the bound package: named types and evaluated constants
//! - `EnumResolver` - find a named type and every constant declared with it

pub mod build_context;
pub use build_context::BuildContext;

pub mod symbols;
pub use symbols::{
    BasicKind, ConstDef, ConstType, ConstValue, SymbolTable, TypeDef, TypeRef, Underlying,
};

pub mod evaluator;
pub use evaluator::{ConstEvaluator, EvalError};

pub mod state;
pub use state::{BindError, BinderState};

pub mod package_loader;
pub use package_loader::{LoadError, load_package};

pub mod resolver;
pub use resolver::{EnumResolver, RawConstant, ResolutionError, ResolvedEnum, UnderlyingKind};

#[cfg(test)]
#[path = "tests/build_context_tests.rs"]
mod build_context_tests;
#[cfg(test)]
#[path = "tests/evaluator_tests.rs"]
mod evaluator_tests;
#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
mod test_fixtures;
