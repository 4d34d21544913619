use crate::{BinderState, ConstValue, EvalError, SymbolTable};
use enumgen_parser::parse_source_file;

pub(crate) const PACKAGE_PATH: &str = "example.com/paint";

/// Bind a single-file package from source text.
pub(crate) fn bind_source(source: &str) -> SymbolTable {
    let file = parse_source_file("fixture.go", source).expect("fixture should parse");
    BinderState::new("paint", PACKAGE_PATH)
        .bind(&[file])
        .expect("fixture should bind")
}

pub(crate) fn value_of(table: &SymbolTable, name: &str) -> Result<ConstValue, EvalError> {
    table
        .constant(name)
        .unwrap_or_else(|| panic!("constant {name} should be declared"))
        .value
        .clone()
}

pub(crate) fn int_of(table: &SymbolTable, name: &str) -> i128 {
    match value_of(table, name) {
        Ok(ConstValue::Int(n)) => n,
        other => panic!("{name}: expected integer, got {other:?}"),
    }
}
