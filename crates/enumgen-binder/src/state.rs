//! Binding parsed files into a `SymbolTable`.
//!
//! Binding runs in two passes: type declarations first, so every constant
//! can see every type, then constant declarations, evaluated lazily in
//! declaration order.

use crate::evaluator::ConstEvaluator;
use crate::symbols::{ConstDef, SymbolTable, TypeDef, TypeRef};
use enumgen_parser::{ConstSpec, SourceFile, TypeExpr};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{name} redeclared in {file} (previous declaration in {previous})")]
    Redeclared {
        name: String,
        file: String,
        previous: String,
    },
}

pub struct BinderState {
    table: SymbolTable,
    /// Declaring file of every package-level name.
    declared: FxHashMap<String, String>,
}

impl BinderState {
    pub fn new(package_name: impl Into<String>, package_path: impl Into<String>) -> Self {
        BinderState {
            table: SymbolTable::new(package_name, package_path),
            declared: FxHashMap::default(),
        }
    }

    /// Bind all files of one package and return the finished table.
    pub fn bind(mut self, files: &[SourceFile]) -> Result<SymbolTable, BindError> {
        for file in files {
            for spec in file.type_specs() {
                self.declare(&spec.name.name, &file.file_name)?;
                let underlying = match &spec.ty {
                    TypeExpr::Name(ident) => TypeRef::Name {
                        name: ident.name.clone(),
                    },
                    TypeExpr::Qualified { package, name } => TypeRef::Qualified {
                        package: package.name.clone(),
                        name: name.name.clone(),
                    },
                    TypeExpr::Composite(_) => TypeRef::Composite,
                };
                self.table.types.insert(
                    spec.name.name.clone(),
                    TypeDef {
                        name: spec.name.name.clone(),
                        alias: spec.alias,
                        underlying,
                        file: file.file_name.clone(),
                    },
                );
            }
        }

        let mut order: Vec<(&str, &ConstSpec, &str)> = Vec::new();
        for file in files {
            for spec in file.const_specs() {
                for ident in spec.names.iter().filter(|ident| !ident.is_blank()) {
                    self.declare(&ident.name, &file.file_name)?;
                    order.push((ident.name.as_str(), spec, file.file_name.as_str()));
                }
            }
        }

        let constants = {
            let mut evaluator = ConstEvaluator::new(&self.table);
            for (name, spec, _) in &order {
                let index = spec
                    .names
                    .iter()
                    .position(|ident| ident.name == *name)
                    .unwrap_or_default();
                evaluator.declare(name, spec, index);
            }
            order
                .iter()
                .map(|&(name, _, file)| {
                    let value = evaluator.evaluate(name);
                    let ty = match &value {
                        Ok(typed) => self.table.type_string(&typed.ty),
                        Err(_) => evaluator
                            .static_type(name)
                            .and_then(|ty| self.table.type_string(&ty)),
                    };
                    ConstDef {
                        name: name.to_string(),
                        ty,
                        value: value.map(|typed| typed.value),
                        file: file.to_string(),
                    }
                })
                .collect::<Vec<_>>()
        };

        debug!(
            package = %self.table.package_path,
            types = self.table.types.len(),
            constants = constants.len(),
            "bound package"
        );
        self.table.constants = constants;
        Ok(self.table)
    }

    fn declare(&mut self, name: &str, file: &str) -> Result<(), BindError> {
        if let Some(previous) = self.declared.get(name) {
            return Err(BindError::Redeclared {
                name: name.to_string(),
                file: file.to_string(),
                previous: previous.clone(),
            });
        }
        self.declared.insert(name.to_string(), file.to_string());
        Ok(())
    }
}
