//! Resolving a requested type name to its enum constants.

use crate::evaluator::EvalError;
use crate::symbols::{BasicKind, ConstValue, SymbolTable, Underlying};
use enumgen_common::quote_go_string;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlyingKind {
    Integer,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawConstant {
    pub name: String,
    /// Go literal text: decimal digits, or a quoted string.
    pub literal: String,
    pub value: ConstValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnum {
    pub full_name: String,
    pub name: String,
    pub kind: UnderlyingKind,
    pub basic: BasicKind,
    pub is_named: bool,
    /// In declaration order.
    pub constants: Vec<RawConstant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("invalid type name {0:?}")]
    InvalidTypeName(String),
    #[error("type {0} not found")]
    TypeNotFound(String),
    #[error("type {name} has unsupported underlying type {underlying}")]
    UnsupportedUnderlyingType { name: String, underlying: String },
    #[error("constant {constant} of type {name}")]
    ConstantEvaluation {
        name: String,
        constant: String,
        source: EvalError,
    },
    #[error("no constants of type {0} found")]
    NoConstants(String),
}

/// Finds a named type and every constant declared with it.
pub trait EnumResolver {
    fn resolve(&self, type_name: &str) -> Result<ResolvedEnum, ResolutionError>;
}

impl EnumResolver for SymbolTable {
    fn resolve(&self, type_name: &str) -> Result<ResolvedEnum, ResolutionError> {
        if !is_identifier(type_name) {
            return Err(ResolutionError::InvalidTypeName(type_name.to_string()));
        }
        let def = self
            .types
            .get(type_name)
            .ok_or_else(|| ResolutionError::TypeNotFound(type_name.to_string()))?;
        // An alias carries the constants of the named type it stands for.
        let target = if def.alias {
            self.resolve_alias(type_name)
                .ok_or_else(|| ResolutionError::TypeNotFound(type_name.to_string()))?
        } else {
            def
        };

        let basic = match self.underlying(&target.name) {
            Underlying::Basic(basic) => basic,
            other => {
                return Err(ResolutionError::UnsupportedUnderlyingType {
                    name: type_name.to_string(),
                    underlying: other.to_string(),
                });
            }
        };
        let kind = match basic {
            BasicKind::String => UnderlyingKind::String,
            kind if kind.is_integer() => UnderlyingKind::Integer,
            other => {
                return Err(ResolutionError::UnsupportedUnderlyingType {
                    name: type_name.to_string(),
                    underlying: other.to_string(),
                });
            }
        };

        let full_name = self.qualified_name(&target.name);
        let mut constants = Vec::new();
        for constant in self
            .constants
            .iter()
            .filter(|c| c.ty.as_deref() == Some(full_name.as_str()))
        {
            let value = constant
                .value
                .clone()
                .map_err(|source| ResolutionError::ConstantEvaluation {
                    name: type_name.to_string(),
                    constant: constant.name.clone(),
                    source,
                })?;
            let literal = match (&value, kind) {
                (ConstValue::Int(n), UnderlyingKind::Integer) => n.to_string(),
                (ConstValue::Str(s), UnderlyingKind::String) => quote_go_string(s),
                (other, _) => {
                    return Err(ResolutionError::ConstantEvaluation {
                        name: type_name.to_string(),
                        constant: constant.name.clone(),
                        source: EvalError::Conversion {
                            value: other.to_string(),
                            ty: type_name.to_string(),
                        },
                    });
                }
            };
            constants.push(RawConstant {
                name: constant.name.clone(),
                literal,
                value,
            });
        }

        if constants.is_empty() {
            return Err(ResolutionError::NoConstants(type_name.to_string()));
        }
        debug!(
            type_name,
            full_name = %full_name,
            constants = constants.len(),
            "resolved enum"
        );
        Ok(ResolvedEnum {
            full_name,
            name: type_name.to_string(),
            kind,
            basic,
            is_named: !def.alias,
            constants,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && name != "_"
}
