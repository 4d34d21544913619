//! Constant expression evaluation.
//!
//! Values are exact (`i128` integers, strings, booleans). Types follow Go's
//! rules for the supported subset: untyped operands adopt the type of the
//! typed operand they meet, and every typed result must be representable
//! in its type. Evaluation is lazy and memoized so constants may reference
//! each other in any order.

use crate::symbols::{BasicKind, ConstType, ConstValue, SymbolTable, Underlying};
use enumgen_parser::{BinaryOp, ConstSpec, Expr, ExprKind, UnaryOp};
use enumgen_scanner::{LiteralError, parse_int_literal, unquote_rune, unquote_string};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("undefined: {0}")]
    Undefined(String),
    #[error("{0} refers to another package")]
    Imported(String),
    #[error("initialization cycle involving {0}")]
    Cycle(String),
    #[error("{0} constants are not supported")]
    UnsupportedLiteral(&'static str),
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error("constant {value} overflows {ty}")]
    Overflow { value: String, ty: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid shift count {0}")]
    ShiftCount(i128),
    #[error("invalid operation: mismatched types {left} and {right}")]
    Mismatch { left: String, right: String },
    #[error("invalid operation: operator {op} not defined on {operand}")]
    Operator { op: &'static str, operand: String },
    #[error("cannot convert {value} to type {ty}")]
    Conversion { value: String, ty: String },
    #[error("cannot use {value} (constant of type {from}) as {to} value")]
    Assignment {
        value: String,
        from: String,
        to: String,
    },
    #[error("{0} is not constant")]
    NotConstant(String),
    #[error("missing init expression for {0}")]
    MissingValue(String),
    #[error("unsupported constant expression")]
    Unsupported,
}

/// A constant value together with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedConst {
    pub ty: ConstType,
    pub value: ConstValue,
}

impl TypedConst {
    fn untyped(value: ConstValue) -> Self {
        TypedConst {
            ty: ConstType::Untyped,
            value,
        }
    }
}

struct Pending<'a> {
    spec: &'a ConstSpec,
    index: usize,
}

pub struct ConstEvaluator<'a> {
    table: &'a SymbolTable,
    pending: FxHashMap<String, Pending<'a>>,
    cache: FxHashMap<String, Result<TypedConst, EvalError>>,
    in_progress: FxHashSet<String>,
}

impl<'a> ConstEvaluator<'a> {
    /// `table` supplies the package's type declarations.
    pub fn new(table: &'a SymbolTable) -> Self {
        ConstEvaluator {
            table,
            pending: FxHashMap::default(),
            cache: FxHashMap::default(),
            in_progress: FxHashSet::default(),
        }
    }

    /// Register the constant at `index` of `spec`'s name list.
    pub fn declare(&mut self, name: &str, spec: &'a ConstSpec, index: usize) {
        self.pending.insert(name.to_string(), Pending { spec, index });
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }

    pub fn evaluate(&mut self, name: &str) -> Result<TypedConst, EvalError> {
        if let Some(result) = self.cache.get(name) {
            return result.clone();
        }
        let Some(&Pending { spec, index }) = self.pending.get(name) else {
            return Err(EvalError::Undefined(name.to_string()));
        };
        if !self.in_progress.insert(name.to_string()) {
            return Err(EvalError::Cycle(name.to_string()));
        }

        let result = match spec.values.get(index) {
            Some(expr) => self.eval_expr(expr, spec.iota).and_then(|value| {
                match spec.ty.as_ref().map(|ty| self.declared_type(ty)) {
                    Some(target) => self.assign(target?, value),
                    None => Ok(value),
                }
            }),
            None => Err(EvalError::MissingValue(name.to_string())),
        };

        self.in_progress.remove(name);
        tracing::trace!(name, ?result, "evaluated constant");
        self.cache.insert(name.to_string(), result.clone());
        result
    }

    /// The type a constant is declared with, when it can be known without
    /// a successful evaluation: its explicit type or an outer conversion.
    pub fn static_type(&self, name: &str) -> Option<ConstType> {
        if let Some(Ok(typed)) = self.cache.get(name) {
            return Some(typed.ty.clone()).filter(|ty| *ty != ConstType::Untyped);
        }
        let pending = self.pending.get(name)?;
        match &pending.spec.ty {
            Some(ty) => self.declared_type(ty).ok(),
            None => self.expr_type(pending.spec.values.get(pending.index)?),
        }
    }

    fn expr_type(&self, expr: &Expr) -> Option<ConstType> {
        match &expr.kind {
            ExprKind::Paren(inner) | ExprKind::Unary { operand: inner, .. } => {
                self.expr_type(inner)
            }
            ExprKind::Binary { op, .. } if op.is_comparison() => None,
            ExprKind::Binary { op, left, right } => self
                .expr_type(left)
                .or_else(|| if op.is_shift() { None } else { self.expr_type(right) }),
            ExprKind::Call { callee, .. } => match &strip_parens(callee).kind {
                ExprKind::Name(name) => self.table.const_type(name),
                _ => None,
            },
            ExprKind::Name(name) => match self.cache.get(name) {
                Some(Ok(typed)) if typed.ty != ConstType::Untyped => Some(typed.ty.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    fn declared_type(&self, ty: &enumgen_parser::TypeExpr) -> Result<ConstType, EvalError> {
        match ty {
            enumgen_parser::TypeExpr::Name(ident) => self
                .table
                .const_type(&ident.name)
                .ok_or_else(|| EvalError::Undefined(ident.name.clone())),
            enumgen_parser::TypeExpr::Qualified { package, name } => {
                Err(EvalError::Imported(format!("{}.{}", package.name, name.name)))
            }
            enumgen_parser::TypeExpr::Composite(_) => Err(EvalError::Unsupported),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr, iota: u32) -> Result<TypedConst, EvalError> {
        match &expr.kind {
            ExprKind::IntLiteral(text) => Ok(TypedConst::untyped(ConstValue::Int(
                parse_int_literal(text)?,
            ))),
            ExprKind::RuneLiteral(text) => {
                Ok(TypedConst::untyped(ConstValue::Int(unquote_rune(text)?)))
            }
            ExprKind::StringLiteral(text) => {
                Ok(TypedConst::untyped(ConstValue::Str(unquote_string(text)?)))
            }
            ExprKind::FloatLiteral => Err(EvalError::UnsupportedLiteral("floating-point")),
            ExprKind::ImaginaryLiteral => Err(EvalError::UnsupportedLiteral("imaginary")),
            ExprKind::Name(name) => self.eval_name(name, iota),
            ExprKind::Selector { package, name } => {
                Err(EvalError::Imported(format!("{package}.{name}")))
            }
            ExprKind::Paren(inner) => self.eval_expr(inner, iota),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand, iota)?;
                self.unary(*op, operand)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, iota)?;
                let right = self.eval_expr(right, iota)?;
                self.binary(*op, left, right)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, iota),
            ExprKind::Unsupported => Err(EvalError::Unsupported),
        }
    }

    fn eval_name(&mut self, name: &str, iota: u32) -> Result<TypedConst, EvalError> {
        if self.pending.contains_key(name) {
            return self.evaluate(name);
        }
        match name {
            "iota" => Ok(TypedConst::untyped(ConstValue::Int(i128::from(iota)))),
            "true" => Ok(TypedConst::untyped(ConstValue::Bool(true))),
            "false" => Ok(TypedConst::untyped(ConstValue::Bool(false))),
            _ if self.table.types.contains_key(name) || BasicKind::from_name(name).is_some() => {
                Err(EvalError::NotConstant(name.to_string()))
            }
            _ => Err(EvalError::Undefined(name.to_string())),
        }
    }

    fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        iota: u32,
    ) -> Result<TypedConst, EvalError> {
        let name = match &strip_parens(callee).kind {
            ExprKind::Name(name) => name,
            ExprKind::Selector { package, name } => {
                return Err(EvalError::Imported(format!("{package}.{name}")));
            }
            _ => return Err(EvalError::Unsupported),
        };

        let shadowed = self.table.types.contains_key(name) || self.pending.contains_key(name);
        if name == "len" && !shadowed {
            let [arg] = args else {
                return Err(EvalError::Unsupported);
            };
            return match self.eval_expr(arg, iota)?.value {
                ConstValue::Str(s) => Ok(TypedConst::untyped(ConstValue::Int(s.len() as i128))),
                _ => Err(EvalError::NotConstant("len".to_string())),
            };
        }

        let Some(target) = self.table.const_type(name) else {
            return Err(if self.table.types.contains_key(name) {
                EvalError::Unsupported
            } else {
                EvalError::NotConstant(format!("{name}(...)"))
            });
        };
        let [arg] = args else {
            return Err(EvalError::Unsupported);
        };
        let value = self.eval_expr(arg, iota)?;
        self.convert(target, value, true)
    }

    /// Implicit conversion of an initializer to a declared constant type.
    fn assign(&self, target: ConstType, value: TypedConst) -> Result<TypedConst, EvalError> {
        if value.ty != ConstType::Untyped && value.ty != target {
            return Err(EvalError::Assignment {
                value: value.value.to_string(),
                from: self.type_label(&value.ty),
                to: self.type_label(&target),
            });
        }
        self.convert(target, value, false)
    }

    fn convert(
        &self,
        target: ConstType,
        value: TypedConst,
        explicit: bool,
    ) -> Result<TypedConst, EvalError> {
        let underlying = match &target {
            ConstType::Untyped => return Ok(value),
            ConstType::Basic(kind) => Underlying::Basic(*kind),
            ConstType::Named(name) => self.table.underlying(name),
        };
        let basic = match underlying {
            Underlying::Basic(kind) => kind,
            Underlying::Imported(_) | Underlying::Unknown(_) => {
                return Ok(TypedConst {
                    ty: target,
                    value: value.value,
                });
            }
            Underlying::Composite => return Err(self.conversion_error(&value, &target)),
        };

        let converted = match (&value.value, basic) {
            (ConstValue::Int(_), kind) if kind.is_integer() => value.value.clone(),
            (ConstValue::Int(n), BasicKind::String) if explicit => {
                let ch = u32::try_from(*n)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                ConstValue::Str(ch.to_string().into_bytes())
            }
            (ConstValue::Str(_), BasicKind::String) | (ConstValue::Bool(_), BasicKind::Bool) => {
                value.value.clone()
            }
            (ConstValue::Int(_), kind) if kind.is_float() => {
                return Err(EvalError::UnsupportedLiteral("floating-point"));
            }
            _ => return Err(self.conversion_error(&value, &target)),
        };
        let result = TypedConst {
            ty: target,
            value: converted,
        };
        self.check_representable(&result)?;
        Ok(result)
    }

    fn conversion_error(&self, value: &TypedConst, target: &ConstType) -> EvalError {
        EvalError::Conversion {
            value: value.value.to_string(),
            ty: self.type_label(target),
        }
    }

    fn check_representable(&self, typed: &TypedConst) -> Result<(), EvalError> {
        let ConstValue::Int(n) = typed.value else {
            return Ok(());
        };
        let Some((min, max)) = self.table.basic_of(&typed.ty).and_then(BasicKind::range) else {
            return Ok(());
        };
        if n < min || n > max {
            return Err(EvalError::Overflow {
                value: n.to_string(),
                ty: self.type_label(&typed.ty),
            });
        }
        Ok(())
    }

    fn unary(&self, op: UnaryOp, operand: TypedConst) -> Result<TypedConst, EvalError> {
        let value = match (op, &operand.value) {
            (UnaryOp::Plus, ConstValue::Int(n)) => ConstValue::Int(*n),
            (UnaryOp::Neg, ConstValue::Int(n)) => {
                ConstValue::Int(n.checked_neg().ok_or_else(|| overflow(*n, "untyped int"))?)
            }
            (UnaryOp::Not, ConstValue::Bool(b)) => ConstValue::Bool(!b),
            (UnaryOp::Complement, ConstValue::Int(n)) => {
                match self.table.basic_of(&operand.ty) {
                    Some(kind) if kind.is_unsigned() => {
                        let mask = kind.range().map_or(0, |(_, max)| max);
                        ConstValue::Int(n ^ mask)
                    }
                    _ => ConstValue::Int(!n),
                }
            }
            _ => {
                return Err(EvalError::Operator {
                    op: unary_symbol(op),
                    operand: operand.value.kind_name().to_string(),
                });
            }
        };
        let result = TypedConst {
            ty: operand.ty,
            value,
        };
        self.check_representable(&result)?;
        Ok(result)
    }

    fn binary(
        &self,
        op: BinaryOp,
        left: TypedConst,
        right: TypedConst,
    ) -> Result<TypedConst, EvalError> {
        if op.is_shift() {
            return self.shift(op, left, right);
        }

        let ty = match (&left.ty, &right.ty) {
            (ConstType::Untyped, other) | (other, ConstType::Untyped) => other.clone(),
            (l, r) if l == r => l.clone(),
            (l, r) => {
                return Err(EvalError::Mismatch {
                    left: self.type_label(l),
                    right: self.type_label(r),
                });
            }
        };
        let operator_error = |operand: &ConstValue| EvalError::Operator {
            op: binary_symbol(op),
            operand: operand.kind_name().to_string(),
        };

        if op.is_comparison() {
            let ordering = match (&left.value, &right.value) {
                (ConstValue::Int(l), ConstValue::Int(r)) => l.cmp(r),
                (ConstValue::Str(l), ConstValue::Str(r)) => l.cmp(r),
                (ConstValue::Bool(l), ConstValue::Bool(r))
                    if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) =>
                {
                    l.cmp(r)
                }
                (l, _) => return Err(operator_error(l)),
            };
            let result = match op {
                BinaryOp::Eq => ordering.is_eq(),
                BinaryOp::NotEq => ordering.is_ne(),
                BinaryOp::Less => ordering.is_lt(),
                BinaryOp::LessEq => ordering.is_le(),
                BinaryOp::Greater => ordering.is_gt(),
                _ => ordering.is_ge(),
            };
            return Ok(TypedConst::untyped(ConstValue::Bool(result)));
        }

        let value = match (&left.value, &right.value) {
            (ConstValue::Bool(l), ConstValue::Bool(r)) => match op {
                BinaryOp::LogicalAnd => ConstValue::Bool(*l && *r),
                BinaryOp::LogicalOr => ConstValue::Bool(*l || *r),
                _ => return Err(operator_error(&left.value)),
            },
            (ConstValue::Str(l), ConstValue::Str(r)) if op == BinaryOp::Add => {
                ConstValue::Str([l.as_slice(), r.as_slice()].concat())
            }
            (ConstValue::Int(l), ConstValue::Int(r)) => {
                let (l, r) = (*l, *r);
                let label = || self.type_label(&ty);
                ConstValue::Int(match op {
                    BinaryOp::Add => l.checked_add(r).ok_or_else(|| overflow(l, &label()))?,
                    BinaryOp::Sub => l.checked_sub(r).ok_or_else(|| overflow(l, &label()))?,
                    BinaryOp::Mul => l.checked_mul(r).ok_or_else(|| overflow(l, &label()))?,
                    BinaryOp::Div | BinaryOp::Rem if r == 0 => {
                        return Err(EvalError::DivisionByZero);
                    }
                    BinaryOp::Div => l.checked_div(r).ok_or_else(|| overflow(l, &label()))?,
                    BinaryOp::Rem => l.checked_rem(r).ok_or_else(|| overflow(l, &label()))?,
                    BinaryOp::And => l & r,
                    BinaryOp::Or => l | r,
                    BinaryOp::Xor => l ^ r,
                    BinaryOp::AndNot => l & !r,
                    _ => return Err(operator_error(&left.value)),
                })
            }
            (l, r) if std::mem::discriminant(l) == std::mem::discriminant(r) => {
                return Err(operator_error(l));
            }
            (l, r) => {
                return Err(EvalError::Mismatch {
                    left: l.kind_name().to_string(),
                    right: r.kind_name().to_string(),
                });
            }
        };

        let result = TypedConst { ty, value };
        self.check_representable(&result)?;
        Ok(result)
    }

    fn shift(
        &self,
        op: BinaryOp,
        left: TypedConst,
        right: TypedConst,
    ) -> Result<TypedConst, EvalError> {
        let (ConstValue::Int(value), ConstValue::Int(count)) = (&left.value, &right.value) else {
            let operand = match left.value {
                ConstValue::Int(_) => &right.value,
                _ => &left.value,
            };
            return Err(EvalError::Operator {
                op: binary_symbol(op),
                operand: operand.kind_name().to_string(),
            });
        };
        let (value, count) = (*value, *count);
        let shift = u32::try_from(count).map_err(|_| EvalError::ShiftCount(count))?;

        let shifted = if op == BinaryOp::Shl {
            if value == 0 {
                0
            } else if shift >= 127 {
                return Err(overflow(value, &self.type_label(&left.ty)));
            } else {
                let shifted = value << shift;
                if shifted >> shift != value {
                    return Err(overflow(value, &self.type_label(&left.ty)));
                }
                shifted
            }
        } else if shift >= 127 {
            if value < 0 { -1 } else { 0 }
        } else {
            value >> shift
        };

        let result = TypedConst {
            ty: left.ty,
            value: ConstValue::Int(shifted),
        };
        self.check_representable(&result)?;
        Ok(result)
    }

    fn type_label(&self, ty: &ConstType) -> String {
        match ty {
            ConstType::Untyped => "untyped constant".to_string(),
            ConstType::Basic(kind) => kind.name().to_string(),
            ConstType::Named(name) => name.clone(),
        }
    }
}

fn strip_parens(expr: &Expr) -> &Expr {
    match &expr.kind {
        ExprKind::Paren(inner) => strip_parens(inner),
        _ => expr,
    }
}

fn overflow(value: i128, ty: &str) -> EvalError {
    EvalError::Overflow {
        value: value.to_string(),
        ty: ty.to_string(),
    }
}

const fn unary_symbol(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "+",
        UnaryOp::Neg => "-",
        UnaryOp::Not => "!",
        UnaryOp::Complement => "^",
    }
}

const fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::LogicalOr => "||",
        BinaryOp::LogicalAnd => "&&",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::Less => "<",
        BinaryOp::LessEq => "<=",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterEq => ">=",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Or => "|",
        BinaryOp::Xor => "^",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Rem => "%",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::And => "&",
        BinaryOp::AndNot => "&^",
    }
}
