use crate::{ScanErrorKind, SyntaxKind, tokenize};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    tokenize(source)
        .expect("source should scan")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_package_clause_gets_implicit_semicolon() {
    assert_eq!(
        kinds("package colors\n"),
        vec![
            SyntaxKind::PackageKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::EndOfFile,
        ]
    );
}

#[test]
fn test_no_semicolon_after_open_paren() {
    let source = "const (\n\tRed Color = iota\n)\n";
    assert_eq!(
        kinds(source),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::OpenParen,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Equals,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::CloseParen,
            SyntaxKind::Semicolon,
            SyntaxKind::EndOfFile,
        ]
    );
}

#[test]
fn test_semicolon_at_eof_without_newline() {
    let tokens = tokenize("type Color int").unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(tokens[3].is_implicit());
    assert_eq!(tokens[4].kind, SyntaxKind::EndOfFile);
}

#[test]
fn test_comments_are_skipped() {
    let source = "a // trailing\n/* block */ b /* multi\nline */ c";
    assert_eq!(
        kinds(source),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::EndOfFile,
        ]
    );
}

#[test]
fn test_literal_kinds_and_text() {
    let source = "0x1F 1.5 2i 'x' \"s\\\"q\" `raw\nstr`";
    let tokens = tokenize(source).unwrap();
    let got: Vec<(SyntaxKind, &str)> = tokens
        .iter()
        .filter(|t| t.kind.is_literal())
        .map(|t| (t.kind, t.text(source)))
        .collect();
    assert_eq!(
        got,
        vec![
            (SyntaxKind::IntLiteral, "0x1F"),
            (SyntaxKind::FloatLiteral, "1.5"),
            (SyntaxKind::ImaginaryLiteral, "2i"),
            (SyntaxKind::RuneLiteral, "'x'"),
            (SyntaxKind::StringLiteral, "\"s\\\"q\""),
            (SyntaxKind::StringLiteral, "`raw\nstr`"),
        ]
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("1 << iota &^ x"),
        vec![
            SyntaxKind::IntLiteral,
            SyntaxKind::LessThanLessThan,
            SyntaxKind::Identifier,
            SyntaxKind::AmpersandCaret,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::EndOfFile,
        ]
    );
    assert_eq!(kinds("x := y")[1], SyntaxKind::ColonEquals);
    assert_eq!(kinds("x &^= y")[1], SyntaxKind::AssignOp);
}

#[test]
fn test_unicode_identifier() {
    let source = "const Größe = 1";
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens[1].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[1].text(source), "Größe");
}

#[test]
fn test_scan_errors() {
    let err = tokenize("x := \"open\n").unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::UnterminatedString);
    assert_eq!(err.pos, 5);

    let err = tokenize("/* never closed").unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::UnterminatedComment);

    let err = tokenize("x = 12ab").unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::MalformedNumber);

    let err = tokenize("x = #").unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::UnexpectedCharacter('#'));
}
