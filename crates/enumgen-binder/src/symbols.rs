//! The bound package: named types and evaluated constants.

use crate::evaluator::EvalError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Go's predeclared basic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl BasicKind {
    /// Look up a predeclared type name, including the `byte` and `rune` aliases.
    pub fn from_name(name: &str) -> Option<BasicKind> {
        Some(match name {
            "bool" => BasicKind::Bool,
            "string" => BasicKind::String,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" | "rune" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" | "byte" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uintptr" => BasicKind::Uintptr,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            "complex64" => BasicKind::Complex64,
            "complex128" => BasicKind::Complex128,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
        }
    }

    pub const fn is_integer(self) -> bool {
        self.width().is_some()
    }

    pub const fn is_float(self) -> bool {
        matches!(
            self,
            BasicKind::Float32 | BasicKind::Float64 | BasicKind::Complex64 | BasicKind::Complex128
        )
    }

    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Uintptr
        )
    }

    /// Storage width of an integer type. Platform-sized types are 64 bits.
    pub const fn width(self) -> Option<u32> {
        match self {
            BasicKind::Int8 | BasicKind::Uint8 => Some(8),
            BasicKind::Int16 | BasicKind::Uint16 => Some(16),
            BasicKind::Int32 | BasicKind::Uint32 => Some(32),
            BasicKind::Int
            | BasicKind::Int64
            | BasicKind::Uint
            | BasicKind::Uint64
            | BasicKind::Uintptr => Some(64),
            _ => None,
        }
    }

    /// The `bitSize` argument `strconv.ParseInt` expects: 0 for platform-sized types.
    pub const fn parse_bits(self) -> u32 {
        match self {
            BasicKind::Int | BasicKind::Uint | BasicKind::Uintptr => 0,
            other => match other.width() {
                Some(bits) => bits,
                None => 0,
            },
        }
    }

    /// Inclusive value range of an integer type.
    pub fn range(self) -> Option<(i128, i128)> {
        let bits = self.width()?;
        if self.is_unsigned() {
            Some((0, (1i128 << bits) - 1))
        } else {
            Some((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1))
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The evaluated value of a constant. String constants are byte strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConstValue {
    Int(i128),
    #[serde(serialize_with = "serialize_lossy")]
    Str(Vec<u8>),
    Bool(bool),
}

fn serialize_lossy<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

impl ConstValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstValue::Int(_) => "integer",
            ConstValue::Str(_) => "string",
            ConstValue::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(value) => write!(f, "{value}"),
            ConstValue::Str(value) => f.write_str(&enumgen_common::quote_go_string(value)),
            ConstValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// The type of a constant expression. Aliases are already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstType {
    Untyped,
    Basic(BasicKind),
    /// A named type declared in this package.
    Named(String),
}

/// The right-hand side of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeRef {
    /// A bare identifier: a local type or a predeclared one.
    Name { name: String },
    /// A type from another package.
    Qualified { package: String, name: String },
    Composite,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub alias: bool,
    pub underlying: TypeRef,
    pub file: String,
}

/// What a local named type ultimately stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Underlying {
    Basic(BasicKind),
    Imported(String),
    Composite,
    /// An identifier that names neither a local type nor a basic one.
    Unknown(String),
}

impl fmt::Display for Underlying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Underlying::Basic(kind) => write!(f, "{kind}"),
            Underlying::Imported(name) => f.write_str(name),
            Underlying::Composite => f.write_str("composite type"),
            Underlying::Unknown(name) => write!(f, "unknown type {name}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstDef {
    pub name: String,
    /// Fully qualified type, `None` for untyped constants.
    pub ty: Option<String>,
    pub value: Result<ConstValue, EvalError>,
    pub file: String,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    pub package_name: String,
    pub package_path: String,
    pub types: IndexMap<String, TypeDef>,
    pub constants: Vec<ConstDef>,
}

impl SymbolTable {
    pub fn new(package_name: impl Into<String>, package_path: impl Into<String>) -> Self {
        SymbolTable {
            package_name: package_name.into(),
            package_path: package_path.into(),
            ..Default::default()
        }
    }

    pub fn qualified_name(&self, local: &str) -> String {
        format!("{}.{local}", self.package_path)
    }

    pub fn constant(&self, name: &str) -> Option<&ConstDef> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Follow an alias chain to the first non-alias local type. `None` when
    /// the chain leaves the package or points at a predeclared type.
    pub fn resolve_alias(&self, name: &str) -> Option<&TypeDef> {
        let mut current = self.types.get(name)?;
        for _ in 0..=self.types.len() {
            if !current.alias {
                return Some(current);
            }
            match &current.underlying {
                TypeRef::Name { name } => current = self.types.get(name)?,
                _ => return None,
            }
        }
        None
    }

    /// The type a type expression denotes for constant purposes.
    pub fn const_type(&self, name: &str) -> Option<ConstType> {
        let Some(mut def) = self.types.get(name) else {
            return BasicKind::from_name(name).map(ConstType::Basic);
        };
        for _ in 0..=self.types.len() {
            if !def.alias {
                return Some(ConstType::Named(def.name.clone()));
            }
            match &def.underlying {
                TypeRef::Name { name } => match self.types.get(name) {
                    Some(next) => def = next,
                    None => return BasicKind::from_name(name).map(ConstType::Basic),
                },
                _ => return None,
            }
        }
        None
    }

    /// Follow a local type's definition down to what it is built on.
    pub fn underlying(&self, name: &str) -> Underlying {
        let mut current = name;
        for _ in 0..=self.types.len() {
            let Some(def) = self.types.get(current) else {
                return match BasicKind::from_name(current) {
                    Some(kind) => Underlying::Basic(kind),
                    None => Underlying::Unknown(current.to_string()),
                };
            };
            match &def.underlying {
                TypeRef::Name { name } => current = name,
                TypeRef::Qualified { package, name } => {
                    return Underlying::Imported(format!("{package}.{name}"));
                }
                TypeRef::Composite => return Underlying::Composite,
            }
        }
        Underlying::Unknown(name.to_string())
    }

    /// The basic type behind a constant type, if any.
    pub fn basic_of(&self, ty: &ConstType) -> Option<BasicKind> {
        match ty {
            ConstType::Untyped => None,
            ConstType::Basic(kind) => Some(*kind),
            ConstType::Named(name) => match self.underlying(name) {
                Underlying::Basic(kind) => Some(kind),
                _ => None,
            },
        }
    }

    pub fn type_string(&self, ty: &ConstType) -> Option<String> {
        match ty {
            ConstType::Untyped => None,
            ConstType::Basic(kind) => Some(kind.name().to_string()),
            ConstType::Named(name) => Some(self.qualified_name(name)),
        }
    }
}
