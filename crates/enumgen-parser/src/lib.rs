//! Go declaration parser for enumgen.
//!
//! Only the parts of a Go source file that matter for constant discovery are
//! modelled: the package clause, `type` declarations and `const`
//! declarations (with their expressions). Imports, variables and functions are
//! skipped token-wise without building any tree.
//!
//! Build constraints (`//go:build` and legacy `// +build` lines) are parsed
//! separately from the raw text by the [`constraint`] module.

pub mod ast;
pub use ast::{
    BinaryOp, ConstSpec, Decl, Expr, ExprKind, Ident, SourceFile, TypeExpr, TypeSpec, UnaryOp,
};

pub mod parser_state;
pub use parser_state::{ParseError, ParserState, parse_source_file};

pub mod constraint;
pub use constraint::{Constraint, ConstraintError, file_constraint};

#[cfg(test)]
#[path = "tests/parser_state_tests.rs"]
mod parser_state_tests;
#[cfg(test)]
#[path = "tests/constraint_tests.rs"]
mod constraint_tests;
