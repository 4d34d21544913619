//! Top-level declaration parser.

use enumgen_common::Span;
use enumgen_scanner::{ScanError, SyntaxKind, Token, tokenize};
use smallvec::SmallVec;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

use crate::ast::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("{message}")]
    Syntax { message: String, pos: u32 },
}

impl ParseError {
    pub fn pos(&self) -> u32 {
        match self {
            ParseError::Scan(err) => err.pos,
            ParseError::Syntax { pos, .. } => *pos,
        }
    }
}

pub struct ParserState<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

/// Parse the declarations of one Go source file.
pub fn parse_source_file(file_name: &str, source: &str) -> Result<SourceFile, ParseError> {
    ParserState::new(source)?.parse_source_file(file_name)
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        Ok(ParserState {
            source,
            tokens: tokenize(source)?,
            pos: 0,
        })
    }

    pub fn parse_source_file(mut self, file_name: &str) -> Result<SourceFile, ParseError> {
        self.expect(SyntaxKind::PackageKeyword, "package clause")?;
        let package = self.expect_ident()?;
        self.expect_semicolon()?;

        let mut decls = Vec::new();
        loop {
            match self.current().kind {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::Semicolon => self.advance(),
                SyntaxKind::TypeKeyword => {
                    self.advance();
                    self.parse_type_decl(&mut decls)?;
                }
                SyntaxKind::ConstKeyword => {
                    self.advance();
                    self.parse_const_decl(&mut decls)?;
                }
                SyntaxKind::ImportKeyword | SyntaxKind::VarKeyword | SyntaxKind::FuncKeyword => {
                    self.skip_declaration()?;
                }
                _ => {
                    return Err(self.error("non-declaration statement outside function body"));
                }
            }
        }

        trace!(file = file_name, decls = decls.len(), "parsed source file");
        Ok(SourceFile {
            file_name: file_name.to_string(),
            package,
            decls,
        })
    }

    // =========================================================================
    // Token access
    // =========================================================================

    fn current(&self) -> Token {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + offset).min(last)]
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            pos: self.current().span.start,
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            SyntaxKind::EndOfFile => "EOF".to_string(),
            SyntaxKind::Semicolon if token.is_implicit() => "newline".to_string(),
            _ => self.text(token).to_string(),
        };
        self.error(format!("expected {expected}, found {found}"))
    }

    fn expect(&mut self, kind: SyntaxKind, what: &str) -> Result<Token, ParseError> {
        let token = self.current();
        if token.kind == kind {
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.expect(SyntaxKind::Identifier, "identifier")?;
        Ok(Ident::new(self.text(token), token.span))
    }

    /// A declaration ends with `;`, or directly before the `)` closing a group.
    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        match self.current().kind {
            SyntaxKind::Semicolon => {
                self.advance();
                Ok(())
            }
            SyntaxKind::CloseParen | SyntaxKind::EndOfFile => Ok(()),
            _ => Err(self.unexpected("';' or newline")),
        }
    }

    /// Skip tokens up to the `;` that ends the current declaration, stepping
    /// over anything nested in brackets.
    fn skip_declaration(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.current().kind {
                SyntaxKind::EndOfFile => {
                    return if depth == 0 {
                        Ok(())
                    } else {
                        Err(self.unexpected("closing bracket"))
                    };
                }
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1;
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                }
                SyntaxKind::Semicolon if depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a type expression inside a declaration, stopping before the `;` or
    /// group-closing `)` at bracket depth zero. Returns the covered span.
    fn skip_type(&mut self) -> Result<Span, ParseError> {
        let start = self.current().span;
        let mut end = start;
        let mut depth = 0usize;
        loop {
            let token = self.current();
            match token.kind {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::Semicolon if depth == 0 => break,
                SyntaxKind::Equals if depth == 0 => break,
                SyntaxKind::CloseParen if depth == 0 => break,
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1;
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    if depth == 0 {
                        return Err(self.unexpected("type"));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            end = token.span;
            self.advance();
        }
        if depth != 0 {
            return Err(self.unexpected("closing bracket"));
        }
        Ok(start.merge(end))
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    fn parse_type_decl(&mut self, decls: &mut Vec<Decl>) -> Result<(), ParseError> {
        if self.eat(SyntaxKind::OpenParen) {
            while !self.at(SyntaxKind::CloseParen) {
                if self.eat(SyntaxKind::Semicolon) {
                    continue;
                }
                decls.push(Decl::Type(self.parse_type_spec()?));
                self.expect_semicolon()?;
            }
            self.advance();
            return self.expect_semicolon();
        }
        decls.push(Decl::Type(self.parse_type_spec()?));
        self.expect_semicolon()
    }

    fn parse_type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        let name = self.expect_ident()?;
        if self.at(SyntaxKind::OpenBracket) {
            // Generic type parameters or an array/slice type: neither can be an enum.
            let span = self.skip_type()?;
            let alias = self.eat(SyntaxKind::Equals);
            let span = if alias {
                span.merge(self.skip_type()?)
            } else {
                span
            };
            return Ok(TypeSpec {
                name,
                alias,
                ty: TypeExpr::Composite(span),
            });
        }
        let alias = self.eat(SyntaxKind::Equals);
        let ty = self.parse_type_expr()?;
        Ok(TypeSpec { name, alias, ty })
    }

    fn parse_type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.current();
        let ends_type = |kind: SyntaxKind| {
            matches!(
                kind,
                SyntaxKind::Semicolon
                    | SyntaxKind::CloseParen
                    | SyntaxKind::Equals
                    | SyntaxKind::EndOfFile
            )
        };

        if first.kind == SyntaxKind::Identifier {
            if ends_type(self.peek(1).kind) {
                self.advance();
                return Ok(TypeExpr::Name(Ident::new(self.text(first), first.span)));
            }
            if self.peek(1).kind == SyntaxKind::Dot
                && self.peek(2).kind == SyntaxKind::Identifier
                && ends_type(self.peek(3).kind)
            {
                let name = self.peek(2);
                self.advance();
                self.advance();
                self.advance();
                return Ok(TypeExpr::Qualified {
                    package: Ident::new(self.text(first), first.span),
                    name: Ident::new(self.text(name), name.span),
                });
            }
        }
        if ends_type(first.kind) {
            return Err(self.unexpected("type"));
        }
        Ok(TypeExpr::Composite(self.skip_type()?))
    }

    // =========================================================================
    // Constant declarations
    // =========================================================================

    fn parse_const_decl(&mut self, decls: &mut Vec<Decl>) -> Result<(), ParseError> {
        if !self.eat(SyntaxKind::OpenParen) {
            decls.push(Decl::Const(self.parse_const_spec(0, None)?));
            return self.expect_semicolon();
        }

        let mut iota = 0u32;
        let mut previous: Option<(Option<TypeExpr>, Arc<[Expr]>)> = None;
        while !self.at(SyntaxKind::CloseParen) {
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            let spec = self.parse_const_spec(iota, previous.as_ref())?;
            previous = Some((spec.ty.clone(), Arc::clone(&spec.values)));
            decls.push(Decl::Const(spec));
            self.expect_semicolon()?;
            iota += 1;
        }
        self.advance();
        self.expect_semicolon()
    }

    fn parse_const_spec(
        &mut self,
        iota: u32,
        previous: Option<&(Option<TypeExpr>, Arc<[Expr]>)>,
    ) -> Result<ConstSpec, ParseError> {
        let start = self.current().span.start;
        let mut names: SmallVec<[Ident; 1]> = SmallVec::new();
        names.push(self.expect_ident()?);
        while self.eat(SyntaxKind::Comma) {
            names.push(self.expect_ident()?);
        }

        let ty = if matches!(
            self.current().kind,
            SyntaxKind::Equals | SyntaxKind::Semicolon | SyntaxKind::CloseParen
        ) {
            None
        } else {
            Some(self.parse_type_expr()?)
        };

        let (ty, values, implicit) = if self.eat(SyntaxKind::Equals) {
            let mut values = vec![self.parse_expr()?];
            while self.eat(SyntaxKind::Comma) {
                values.push(self.parse_expr()?);
            }
            (ty, Arc::from(values), false)
        } else if ty.is_some() {
            return Err(ParseError::Syntax {
                message: "missing init expr for const declaration".to_string(),
                pos: start,
            });
        } else if let Some((prev_ty, prev_values)) = previous {
            (prev_ty.clone(), Arc::clone(prev_values), true)
        } else {
            return Err(ParseError::Syntax {
                message: "missing init expr for const declaration".to_string(),
                pos: start,
            });
        };

        if values.len() != names.len() {
            let message = if values.len() < names.len() {
                "missing init expr for const declaration"
            } else {
                "extra init expr"
            };
            return Err(ParseError::Syntax {
                message: message.to_string(),
                pos: start,
            });
        }

        Ok(ConstSpec {
            names,
            ty,
            values,
            iota,
            implicit,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_expr(1)
    }

    fn parse_binary_expr(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary_expr()?;
        while let Some(op) = binary_op(self.current().kind) {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary_expr(op.precedence() + 1)?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            };
        }
        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let op = match token.kind {
            SyntaxKind::Plus => Some(UnaryOp::Plus),
            SyntaxKind::Minus => Some(UnaryOp::Neg),
            SyntaxKind::Exclamation => Some(UnaryOp::Not),
            SyntaxKind::Caret => Some(UnaryOp::Complement),
            SyntaxKind::Asterisk | SyntaxKind::Ampersand | SyntaxKind::LessThanMinus => None,
            _ => return self.parse_primary_expr(),
        };
        self.advance();
        let operand = self.parse_unary_expr()?;
        let span = token.span.merge(operand.span);
        let kind = match op {
            Some(op) => ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            None => ExprKind::Unsupported,
        };
        Ok(Expr { kind, span })
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_operand()?;
        loop {
            match self.current().kind {
                SyntaxKind::Dot => {
                    self.advance();
                    let name = self.expect_ident()?;
                    let span = expr.span.merge(name.span);
                    let kind = match expr.kind {
                        ExprKind::Name(package) => ExprKind::Selector {
                            package,
                            name: name.name,
                        },
                        _ => ExprKind::Unsupported,
                    };
                    expr = Expr { kind, span };
                }
                SyntaxKind::OpenParen => {
                    self.advance();
                    let mut args = Vec::new();
                    while !self.at(SyntaxKind::CloseParen) {
                        args.push(self.parse_expr()?);
                        if !self.eat(SyntaxKind::Comma) {
                            break;
                        }
                    }
                    let close = self.expect(SyntaxKind::CloseParen, "')'")?;
                    let span = expr.span.merge(close.span);
                    expr = Expr {
                        kind: ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    };
                }
                SyntaxKind::OpenBracket => {
                    let span = expr.span.merge(self.skip_balanced()?);
                    expr = Expr {
                        kind: ExprKind::Unsupported,
                        span,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let text = self.text(token);
        let kind = match token.kind {
            SyntaxKind::IntLiteral => ExprKind::IntLiteral(text.to_string()),
            SyntaxKind::FloatLiteral => ExprKind::FloatLiteral,
            SyntaxKind::ImaginaryLiteral => ExprKind::ImaginaryLiteral,
            SyntaxKind::RuneLiteral => ExprKind::RuneLiteral(text.to_string()),
            SyntaxKind::StringLiteral => ExprKind::StringLiteral(text.to_string()),
            SyntaxKind::Identifier => ExprKind::Name(text.to_string()),
            SyntaxKind::OpenParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let close = self.expect(SyntaxKind::CloseParen, "')'")?;
                return Ok(Expr {
                    kind: ExprKind::Paren(Box::new(inner)),
                    span: token.span.merge(close.span),
                });
            }
            SyntaxKind::OpenBracket | SyntaxKind::FuncKeyword | SyntaxKind::MapKeyword => {
                // Composite types and function literals are never constants.
                let span = self.skip_operand()?;
                return Ok(Expr {
                    kind: ExprKind::Unsupported,
                    span,
                });
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(Expr {
            kind,
            span: token.span,
        })
    }

    /// Skip one bracketed group starting at the current opening bracket.
    fn skip_balanced(&mut self) -> Result<Span, ParseError> {
        let start = self.current().span;
        let mut depth = 0usize;
        loop {
            let token = self.current();
            match token.kind {
                SyntaxKind::EndOfFile => return Err(self.unexpected("closing bracket")),
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1;
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return Ok(start.merge(token.span));
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip an operand that starts with a type (`[]byte{...}`, `func() {...}`,
    /// `map[K]V{...}`) up to the end of the expression.
    fn skip_operand(&mut self) -> Result<Span, ParseError> {
        let start = self.current().span;
        let mut end = start;
        let mut depth = 0usize;
        loop {
            let token = self.current();
            match token.kind {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::Semicolon | SyntaxKind::Comma if depth == 0 => break,
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1;
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            end = token.span;
            self.advance();
        }
        Ok(start.merge(end))
    }
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    Some(match kind {
        SyntaxKind::BarBar => BinaryOp::LogicalOr,
        SyntaxKind::AmpersandAmpersand => BinaryOp::LogicalAnd,
        SyntaxKind::EqualsEquals => BinaryOp::Eq,
        SyntaxKind::ExclamationEquals => BinaryOp::NotEq,
        SyntaxKind::LessThan => BinaryOp::Less,
        SyntaxKind::LessThanEquals => BinaryOp::LessEq,
        SyntaxKind::GreaterThan => BinaryOp::Greater,
        SyntaxKind::GreaterThanEquals => BinaryOp::GreaterEq,
        SyntaxKind::Plus => BinaryOp::Add,
        SyntaxKind::Minus => BinaryOp::Sub,
        SyntaxKind::Bar => BinaryOp::Or,
        SyntaxKind::Caret => BinaryOp::Xor,
        SyntaxKind::Asterisk => BinaryOp::Mul,
        SyntaxKind::Slash => BinaryOp::Div,
        SyntaxKind::Percent => BinaryOp::Rem,
        SyntaxKind::LessThanLessThan => BinaryOp::Shl,
        SyntaxKind::GreaterThanGreaterThan => BinaryOp::Shr,
        SyntaxKind::Ampersand => BinaryOp::And,
        SyntaxKind::AmpersandCaret => BinaryOp::AndNot,
        _ => return None,
    })
}
