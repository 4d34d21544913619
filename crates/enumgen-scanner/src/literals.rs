//! Decoding of literal token text into values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("invalid digit {digit:?} in {base} literal")]
    InvalidDigit { digit: char, base: &'static str },
    #[error("integer literal {0} overflows")]
    Overflow(String),
    #[error("'_' must separate successive digits")]
    MisplacedSeparator,
    #[error("unknown escape sequence \\{0}")]
    UnknownEscape(char),
    #[error("escape sequence is invalid Unicode code point")]
    InvalidCodePoint,
    #[error("rune literal must contain exactly one character")]
    RuneLength,
    #[error("malformed literal")]
    Malformed,
}

/// Parse Go integer literal text (`42`, `0x2A`, `0o52`, `052`, `0b101010`,
/// with optional `_` separators).
pub fn parse_int_literal(text: &str) -> Result<i128, LiteralError> {
    let (digits, radix, base) = match text.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&text[2..], 16, "hexadecimal"),
        [b'0', b'o' | b'O', ..] => (&text[2..], 8, "octal"),
        [b'0', b'b' | b'B', ..] => (&text[2..], 2, "binary"),
        [b'0', _, ..] => (&text[1..], 8, "octal"),
        _ => (text, 10, "decimal"),
    };

    // A separator may follow the base prefix, but never end the literal or repeat.
    if digits.ends_with('_') || digits.contains("__") || (radix == 10 && digits.starts_with('_'))
    {
        return Err(LiteralError::MisplacedSeparator);
    }

    let mut value: i128 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        if ch == '_' {
            continue;
        }
        let digit = ch
            .to_digit(radix)
            .ok_or(LiteralError::InvalidDigit { digit: ch, base })?;
        value = value
            .checked_mul(i128::from(radix))
            .and_then(|v| v.checked_add(i128::from(digit)))
            .ok_or_else(|| LiteralError::Overflow(text.to_string()))?;
        seen_digit = true;
    }
    if !seen_digit && radix != 8 {
        return Err(LiteralError::Malformed);
    }
    Ok(value)
}

/// Decode a string literal token (interpreted or raw) into its bytes.
///
/// `\x` and octal escapes may produce bytes that are not valid UTF-8.
pub fn unquote_string(text: &str) -> Result<Vec<u8>, LiteralError> {
    if let Some(raw) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        // Carriage returns are discarded from raw strings.
        return Ok(raw.replace('\r', "").into_bytes());
    }
    let body = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or(LiteralError::Malformed)?;

    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match decode_escape(&mut chars, '"')? {
            Escaped::Byte(byte) => bytes.push(byte),
            Escaped::Char(c) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    Ok(bytes)
}

/// Decode a rune literal token into its code point value.
pub fn unquote_rune(text: &str) -> Result<i128, LiteralError> {
    let body = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .ok_or(LiteralError::Malformed)?;
    let mut chars = body.chars().peekable();
    let value = match chars.next() {
        Some('\\') => match decode_escape(&mut chars, '\'')? {
            Escaped::Byte(byte) => i128::from(byte),
            Escaped::Char(c) => i128::from(u32::from(c)),
        },
        Some(c) => i128::from(u32::from(c)),
        None => return Err(LiteralError::RuneLength),
    };
    if chars.next().is_some() {
        return Err(LiteralError::RuneLength);
    }
    Ok(value)
}

enum Escaped {
    Byte(u8),
    Char(char),
}

fn decode_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
) -> Result<Escaped, LiteralError> {
    let Some(ch) = chars.next() else {
        return Err(LiteralError::Malformed);
    };
    let simple = match ch {
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        '\\' => Some('\\'),
        c if c == quote => Some(c),
        _ => None,
    };
    if let Some(c) = simple {
        return Ok(Escaped::Char(c));
    }

    match ch {
        '0'..='7' => {
            let mut value = ch.to_digit(8).unwrap_or(0);
            for _ in 0..2 {
                let digit = chars
                    .next()
                    .and_then(|c| c.to_digit(8))
                    .ok_or(LiteralError::Malformed)?;
                value = value * 8 + digit;
            }
            u8::try_from(value)
                .map(Escaped::Byte)
                .map_err(|_| LiteralError::InvalidCodePoint)
        }
        'x' => read_hex(chars, 2).map(|v| Escaped::Byte(v as u8)),
        'u' | 'U' => {
            let width = if ch == 'u' { 4 } else { 8 };
            let value = read_hex(chars, width)?;
            char::from_u32(value)
                .map(Escaped::Char)
                .ok_or(LiteralError::InvalidCodePoint)
        }
        other => Err(LiteralError::UnknownEscape(other)),
    }
}

fn read_hex(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
) -> Result<u32, LiteralError> {
    let mut value = 0u32;
    for _ in 0..width {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(LiteralError::Malformed)?;
        value = value * 16 + digit;
    }
    Ok(value)
}
