//! Go tokenizer.
//!
//! Comments are skipped. Newlines are significant only through automatic
//! semicolon insertion: a newline (or end of file, or a block comment that
//! spans lines) after a token that can end a statement yields a `Semicolon`
//! token whose span is empty.

use enumgen_common::Span;
use thiserror::Error;

use crate::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }

    /// True for semicolons inserted at a line break rather than written.
    pub const fn is_implicit(&self) -> bool {
        matches!(self.kind, SyntaxKind::Semicolon) && self.span.start == self.span.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("string literal not terminated")]
    UnterminatedString,
    #[error("raw string literal not terminated")]
    UnterminatedRawString,
    #[error("rune literal not terminated")]
    UnterminatedRune,
    #[error("comment not terminated")]
    UnterminatedComment,
    #[error("invalid character {0:?}")]
    UnexpectedCharacter(char),
    #[error("malformed number literal")]
    MalformedNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub pos: u32,
}

pub struct ScannerState<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    insert_semicolon: bool,
}

impl<'a> ScannerState<'a> {
    pub fn new(source: &'a str) -> Self {
        // A leading byte order mark is ignored.
        let pos = if source.starts_with('\u{FEFF}') { 3 } else { 0 };
        ScannerState {
            source,
            bytes: source.as_bytes(),
            pos,
            insert_semicolon: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Result<Token, ScanError> {
        if let Some(semicolon) = self.skip_trivia()? {
            self.insert_semicolon = false;
            return Ok(semicolon);
        }

        let start = self.pos;
        let Some(&byte) = self.bytes.get(self.pos) else {
            return Ok(self.token(SyntaxKind::EndOfFile, start));
        };

        let kind = if is_identifier_start(byte) {
            self.scan_identifier()
        } else if byte >= 0x80 {
            let ch = self.current_char();
            if ch.is_alphabetic() {
                self.scan_identifier()
            } else {
                return Err(self.error(ScanErrorKind::UnexpectedCharacter(ch), start));
            }
        } else if byte.is_ascii_digit()
            || (byte == b'.' && self.peek(1).is_some_and(|b| b.is_ascii_digit()))
        {
            self.scan_number()?
        } else {
            match byte {
                b'"' => self.scan_string()?,
                b'`' => self.scan_raw_string()?,
                b'\'' => self.scan_rune()?,
                _ => self.scan_operator()?,
            }
        };

        self.insert_semicolon = kind.ends_statement();
        Ok(self.token(kind, start))
    }

    fn token(&self, kind: SyntaxKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        }
    }

    fn error(&self, kind: ScanErrorKind, pos: usize) -> ScanError {
        ScanError {
            kind,
            pos: pos as u32,
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn current_char(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Skip whitespace and comments. Returns an implicit semicolon when a line
    /// break (or end of input) terminates a statement.
    fn skip_trivia(&mut self) -> Result<Option<Token>, ScanError> {
        loop {
            let Some(byte) = self.peek(0) else {
                if self.insert_semicolon {
                    return Ok(Some(self.implicit_semicolon()));
                }
                return Ok(None);
            };
            match byte {
                b'\n' => {
                    if self.insert_semicolon {
                        let semicolon = self.implicit_semicolon();
                        self.pos += 1;
                        return Ok(Some(semicolon));
                    }
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if self.peek(1) == Some(b'/') => {
                    while let Some(b) = self.peek(0) {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    let mut spans_lines = false;
                    loop {
                        match self.peek(0) {
                            None => {
                                return Err(self.error(ScanErrorKind::UnterminatedComment, start));
                            }
                            Some(b'*') if self.peek(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(b) => {
                                spans_lines |= b == b'\n';
                                self.pos += 1;
                            }
                        }
                    }
                    if spans_lines && self.insert_semicolon {
                        return Ok(Some(self.implicit_semicolon()));
                    }
                }
                _ => return Ok(None),
            }
        }
    }

    fn implicit_semicolon(&self) -> Token {
        Token {
            kind: SyntaxKind::Semicolon,
            span: Span::at(self.pos as u32),
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            if is_identifier_part(byte) {
                self.pos += 1;
            } else if byte >= 0x80 {
                let ch = self.current_char();
                if ch.is_alphanumeric() {
                    self.pos += ch.len_utf8();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
        SyntaxKind::keyword(&self.source[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;
        let mut hex = false;

        if self.peek(0) == Some(b'0') {
            match self.peek(1) {
                Some(b'x' | b'X') => {
                    hex = true;
                    self.pos += 2;
                }
                Some(b'o' | b'O' | b'b' | b'B') => {
                    self.pos += 2;
                }
                _ => {}
            }
        }

        let digits_start = self.pos;
        self.eat_digits(hex);
        if self.peek(0) == Some(b'.') {
            kind = SyntaxKind::FloatLiteral;
            self.pos += 1;
            self.eat_digits(hex);
        }
        let exponent = if hex {
            matches!(self.peek(0), Some(b'p' | b'P'))
        } else {
            matches!(self.peek(0), Some(b'e' | b'E'))
        };
        if exponent {
            kind = SyntaxKind::FloatLiteral;
            self.pos += 1;
            if matches!(self.peek(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            self.eat_digits(false);
            if self.pos == exp_start {
                return Err(self.error(ScanErrorKind::MalformedNumber, start));
            }
        }
        if self.peek(0) == Some(b'i') {
            kind = SyntaxKind::ImaginaryLiteral;
            self.pos += 1;
        }
        if self.pos == digits_start && kind == SyntaxKind::IntLiteral {
            // "0x" with nothing after it
            return Err(self.error(ScanErrorKind::MalformedNumber, start));
        }
        if self.peek(0).is_some_and(is_identifier_part) {
            return Err(self.error(ScanErrorKind::MalformedNumber, start));
        }
        Ok(kind)
    }

    fn eat_digits(&mut self, hex: bool) {
        while let Some(byte) = self.peek(0) {
            let is_digit = if hex {
                byte.is_ascii_hexdigit()
            } else {
                byte.is_ascii_digit()
            };
            if is_digit || byte == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_string(&mut self) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some(b'\n') => {
                    return Err(self.error(ScanErrorKind::UnterminatedString, start));
                }
                Some(b'\\') => self.pos += 2,
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(SyntaxKind::StringLiteral);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_raw_string(&mut self) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        self.pos += 1;
        match self.source[self.pos..].find('`') {
            Some(offset) => {
                self.pos += offset + 1;
                Ok(SyntaxKind::StringLiteral)
            }
            None => Err(self.error(ScanErrorKind::UnterminatedRawString, start)),
        }
    }

    fn scan_rune(&mut self) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some(b'\n') => {
                    return Err(self.error(ScanErrorKind::UnterminatedRune, start));
                }
                Some(b'\\') => self.pos += 2,
                Some(b'\'') => {
                    self.pos += 1;
                    return Ok(SyntaxKind::RuneLiteral);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_operator(&mut self) -> Result<SyntaxKind, ScanError> {
        let rest = &self.bytes[self.pos..];
        let (kind, len) = match rest {
            [b'&', b'^', b'=', ..] => (SyntaxKind::AssignOp, 3),
            [b'<', b'<', b'=', ..] => (SyntaxKind::AssignOp, 3),
            [b'>', b'>', b'=', ..] => (SyntaxKind::AssignOp, 3),
            [b'.', b'.', b'.', ..] => (SyntaxKind::DotDotDot, 3),
            [b'&', b'^', ..] => (SyntaxKind::AmpersandCaret, 2),
            [b'&', b'&', ..] => (SyntaxKind::AmpersandAmpersand, 2),
            [b'|', b'|', ..] => (SyntaxKind::BarBar, 2),
            [b'<', b'<', ..] => (SyntaxKind::LessThanLessThan, 2),
            [b'>', b'>', ..] => (SyntaxKind::GreaterThanGreaterThan, 2),
            [b'<', b'-', ..] => (SyntaxKind::LessThanMinus, 2),
            [b'+', b'+', ..] => (SyntaxKind::PlusPlus, 2),
            [b'-', b'-', ..] => (SyntaxKind::MinusMinus, 2),
            [b'=', b'=', ..] => (SyntaxKind::EqualsEquals, 2),
            [b'!', b'=', ..] => (SyntaxKind::ExclamationEquals, 2),
            [b'<', b'=', ..] => (SyntaxKind::LessThanEquals, 2),
            [b'>', b'=', ..] => (SyntaxKind::GreaterThanEquals, 2),
            [b':', b'=', ..] => (SyntaxKind::ColonEquals, 2),
            [b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^', b'=', ..] => {
                (SyntaxKind::AssignOp, 2)
            }
            [b'+', ..] => (SyntaxKind::Plus, 1),
            [b'-', ..] => (SyntaxKind::Minus, 1),
            [b'*', ..] => (SyntaxKind::Asterisk, 1),
            [b'/', ..] => (SyntaxKind::Slash, 1),
            [b'%', ..] => (SyntaxKind::Percent, 1),
            [b'&', ..] => (SyntaxKind::Ampersand, 1),
            [b'|', ..] => (SyntaxKind::Bar, 1),
            [b'^', ..] => (SyntaxKind::Caret, 1),
            [b'<', ..] => (SyntaxKind::LessThan, 1),
            [b'>', ..] => (SyntaxKind::GreaterThan, 1),
            [b'=', ..] => (SyntaxKind::Equals, 1),
            [b'!', ..] => (SyntaxKind::Exclamation, 1),
            [b'~', ..] => (SyntaxKind::Tilde, 1),
            [b'(', ..] => (SyntaxKind::OpenParen, 1),
            [b')', ..] => (SyntaxKind::CloseParen, 1),
            [b'[', ..] => (SyntaxKind::OpenBracket, 1),
            [b']', ..] => (SyntaxKind::CloseBracket, 1),
            [b'{', ..] => (SyntaxKind::OpenBrace, 1),
            [b'}', ..] => (SyntaxKind::CloseBrace, 1),
            [b',', ..] => (SyntaxKind::Comma, 1),
            [b'.', ..] => (SyntaxKind::Dot, 1),
            [b';', ..] => (SyntaxKind::Semicolon, 1),
            [b':', ..] => (SyntaxKind::Colon, 1),
            _ => {
                let ch = self.current_char();
                return Err(self.error(ScanErrorKind::UnexpectedCharacter(ch), self.pos));
            }
        };
        self.pos += len;
        Ok(kind)
    }
}

#[inline]
fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_identifier_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Scan a whole source file. The last token is always `EndOfFile`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = ScannerState::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan()?;
        let done = token.kind == SyntaxKind::EndOfFile;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
