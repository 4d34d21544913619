//! Build constraint lines.
//!
//! A file's constraint comes from its `//go:build` line, or, when there is
//! none, from the conjunction of its legacy `// +build` lines. Both must
//! appear in the file header, before the package clause, preceded only by
//! blank lines and other comments.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Tag(String),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("multiple //go:build comments")]
    Multiple,
    #[error("unexpected {0:?} in //go:build expression")]
    Unexpected(String),
    #[error("unexpected end of //go:build expression")]
    UnexpectedEnd,
}

impl Constraint {
    /// Evaluate against a tag predicate.
    pub fn eval(&self, has_tag: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Constraint::Tag(tag) => has_tag(tag),
            Constraint::Not(inner) => !inner.eval(has_tag),
            Constraint::And(left, right) => left.eval(has_tag) && right.eval(has_tag),
            Constraint::Or(left, right) => left.eval(has_tag) || right.eval(has_tag),
        }
    }

    /// Parse the expression of a `//go:build` line.
    pub fn parse_go_build(expr: &str) -> Result<Constraint, ConstraintError> {
        let tokens = lex(expr)?;
        let mut parser = ExprParser { tokens, pos: 0 };
        let constraint = parser.parse_or()?;
        match parser.tokens.get(parser.pos) {
            None => Ok(constraint),
            Some(token) => Err(ConstraintError::Unexpected(token.to_string())),
        }
    }

    /// Parse the options of a `// +build` line: space-separated alternatives,
    /// each a comma-separated conjunction of possibly negated tags.
    pub fn parse_plus_build(options: &str) -> Option<Constraint> {
        options
            .split_whitespace()
            .filter_map(|alternative| {
                alternative
                    .split(',')
                    .filter(|term| !term.is_empty())
                    .map(|term| match term.strip_prefix('!') {
                        Some(tag) => Constraint::Not(Box::new(Constraint::Tag(tag.to_string()))),
                        None => Constraint::Tag(term.to_string()),
                    })
                    .reduce(|left, right| Constraint::And(Box::new(left), Box::new(right)))
            })
            .reduce(|left, right| Constraint::Or(Box::new(left), Box::new(right)))
    }
}

/// Extract the build constraint from a file's header, if it has one.
pub fn file_constraint(source: &str) -> Result<Option<Constraint>, ConstraintError> {
    let mut go_build = None;
    let mut plus_build: Option<Constraint> = None;
    let mut in_block_comment = false;

    for line in source.lines() {
        let line = line.trim();
        if in_block_comment {
            if let Some(idx) = line.find("*/") {
                in_block_comment = false;
                if !line[idx + 2..].trim().is_empty() {
                    break;
                }
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(expr) = line.strip_prefix("//go:build") {
            if !expr.is_empty() && !expr.starts_with([' ', '\t']) {
                continue;
            }
            if go_build.is_some() {
                return Err(ConstraintError::Multiple);
            }
            go_build = Some(Constraint::parse_go_build(expr)?);
            continue;
        }
        if let Some(comment) = line.strip_prefix("//") {
            if let Some(options) = comment.trim_start().strip_prefix("+build")
                && (options.is_empty() || options.starts_with([' ', '\t']))
                && let Some(constraint) = Constraint::parse_plus_build(options)
            {
                plus_build = Some(match plus_build {
                    Some(previous) => Constraint::And(Box::new(previous), Box::new(constraint)),
                    None => constraint,
                });
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("/*") {
            match rest.find("*/") {
                Some(idx) if rest[idx + 2..].trim().is_empty() => continue,
                Some(_) => break,
                None => {
                    in_block_comment = true;
                    continue;
                }
            }
        }
        break;
    }

    Ok(go_build.or(plus_build))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExprToken {
    Tag(String),
    Not,
    And,
    Or,
    Open,
    Close,
}

impl std::fmt::Display for ExprToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprToken::Tag(tag) => f.write_str(tag),
            ExprToken::Not => f.write_str("!"),
            ExprToken::And => f.write_str("&&"),
            ExprToken::Or => f.write_str("||"),
            ExprToken::Open => f.write_str("("),
            ExprToken::Close => f.write_str(")"),
        }
    }
}

fn lex(expr: &str) -> Result<Vec<ExprToken>, ConstraintError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            ' ' | '\t' => {}
            '!' => tokens.push(ExprToken::Not),
            '(' => tokens.push(ExprToken::Open),
            ')' => tokens.push(ExprToken::Close),
            '&' | '|' => {
                if chars.next_if(|&(_, next)| next == ch).is_none() {
                    return Err(ConstraintError::Unexpected(ch.to_string()));
                }
                tokens.push(if ch == '&' {
                    ExprToken::And
                } else {
                    ExprToken::Or
                });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut end = idx + c.len_utf8();
                while let Some(&(next_idx, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == '.' {
                        end = next_idx + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(ExprToken::Tag(expr[idx..end].to_string()));
            }
            other => return Err(ConstraintError::Unexpected(other.to_string())),
        }
    }
    Ok(tokens)
}

struct ExprParser {
    tokens: Vec<ExprToken>,
    pos: usize,
}

impl ExprParser {
    fn next(&mut self) -> Option<ExprToken> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &ExprToken) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Constraint, ConstraintError> {
        let mut left = self.parse_and()?;
        while self.eat(&ExprToken::Or) {
            let right = self.parse_and()?;
            left = Constraint::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Constraint, ConstraintError> {
        let mut left = self.parse_not()?;
        while self.eat(&ExprToken::And) {
            let right = self.parse_not()?;
            left = Constraint::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Constraint, ConstraintError> {
        match self.next() {
            Some(ExprToken::Not) => Ok(Constraint::Not(Box::new(self.parse_not()?))),
            Some(ExprToken::Open) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(ExprToken::Close) => Ok(inner),
                    Some(token) => Err(ConstraintError::Unexpected(token.to_string())),
                    None => Err(ConstraintError::UnexpectedEnd),
                }
            }
            Some(ExprToken::Tag(tag)) => Ok(Constraint::Tag(tag)),
            Some(token) => Err(ConstraintError::Unexpected(token.to_string())),
            None => Err(ConstraintError::UnexpectedEnd),
        }
    }
}
