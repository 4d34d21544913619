//! Declaration-level syntax tree.

use enumgen_common::Span;
use smallvec::SmallVec;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub package: Ident,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Type(spec) => Some(spec),
            Decl::Const(_) => None,
        })
    }

    pub fn const_specs(&self) -> impl Iterator<Item = &ConstSpec> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Const(spec) => Some(spec),
            Decl::Type(_) => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Decl {
    Type(TypeSpec),
    Const(ConstSpec),
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: Ident,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare type name: `int`, `string`, `Color`.
    Name(Ident),
    /// A type from another package: `time.Duration`.
    Qualified { package: Ident, name: Ident },
    /// Anything else (struct, slice, map, func, generic, ...). Never an enum.
    Composite(Span),
}

/// One constant specification, with Go's implicit repetition already applied:
/// a spec that omits its type and values carries copies of the previous
/// spec's, and `iota` is its index inside the enclosing `const` block.
#[derive(Debug, Clone)]
pub struct ConstSpec {
    pub names: SmallVec<[Ident; 1]>,
    pub ty: Option<TypeExpr>,
    pub values: Arc<[Expr]>,
    pub iota: u32,
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    IntLiteral(String),
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral(String),
    StringLiteral(String),
    Name(String),
    Selector {
        package: String,
        name: String,
    },
    Paren(Box<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Syntax that is valid Go but can never be a supported constant.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    Complement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::LogicalOr => 1,
            BinaryOp::LogicalAnd => 2,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Less
            | BinaryOp::LessEq
            | BinaryOp::Greater
            | BinaryOp::GreaterEq => 3,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Or | BinaryOp::Xor => 4,
            BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::And
            | BinaryOp::AndNot => 5,
        }
    }

    pub const fn is_comparison(self) -> bool {
        self.precedence() == 3
    }

    pub const fn is_shift(self) -> bool {
        matches!(self, BinaryOp::Shl | BinaryOp::Shr)
    }
}
