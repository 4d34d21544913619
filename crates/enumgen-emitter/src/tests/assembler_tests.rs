use crate::test_fixtures::{color_enum, status_enum};
use crate::{
    FlagMode, FormatError, Formatter, GENERATED_MARKER, GoFmt, RenderConfig, assemble, render,
};

struct Uppercase;

impl Formatter for Uppercase {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        Ok(source.to_ascii_uppercase())
    }
}

struct Rejecting;

impl Formatter for Rejecting {
    fn format(&self, _source: &[u8]) -> Result<Vec<u8>, FormatError> {
        Err(FormatError::Failed {
            program: "fake".to_string(),
            stderr: "<standard input>:3:1: expected declaration".to_string(),
        })
    }
}

#[test]
fn test_header_and_package_clause() {
    let rendered = render(&color_enum(), &RenderConfig::default()).unwrap();
    let out = String::from_utf8(assemble(&[rendered], "paint", None).unwrap()).unwrap();
    let expected_head = format!(
        "{GENERATED_MARKER}\n\npackage paint\n\nimport (\n\t\"strconv\"\n\t\"strings\"\n)\n\n// Name returns"
    );
    assert!(out.starts_with(&expected_head), "{out}");
}

#[test]
fn test_imports_merged_across_enums() {
    let color = render(&color_enum(), &RenderConfig::default()).unwrap();
    let status = render(&status_enum(), &RenderConfig::default()).unwrap();
    let out = String::from_utf8(assemble(&[color, status], "paint", None).unwrap()).unwrap();
    assert!(out.contains("import (\n\t\"fmt\"\n\t\"strconv\"\n\t\"strings\"\n)\n"));
    let color_at = out.find("func (v Color) Name()").unwrap();
    let status_at = out.find("func (v Status) Name()").unwrap();
    assert!(color_at < status_at);
}

#[test]
fn test_single_and_no_import_forms() {
    let config = RenderConfig {
        flag_mode: FlagMode::None,
        ..RenderConfig::default()
    };
    let plain = render(&color_enum(), &config).unwrap();
    let out = String::from_utf8(assemble(&[plain], "paint", None).unwrap()).unwrap();
    assert!(!out.contains("import"));

    let status = render(&status_enum(), &RenderConfig::default()).unwrap();
    let out = String::from_utf8(assemble(&[status], "paint", None).unwrap()).unwrap();
    assert!(out.contains("\npackage paint\n\nimport \"fmt\"\n\n"));
}

#[test]
fn test_formatter_applied_last() {
    let rendered = render(&color_enum(), &RenderConfig::default()).unwrap();
    let out = assemble(&[rendered], "paint", Some(&Uppercase)).unwrap();
    assert!(out.starts_with(b"// CODE GENERATED BY ENUMGEN. DO NOT EDIT."));
}

#[test]
fn test_formatter_failure_surfaces_stderr() {
    let rendered = render(&color_enum(), &RenderConfig::default()).unwrap();
    let err = assemble(&[rendered], "paint", Some(&Rejecting)).unwrap_err();
    assert!(err.to_string().contains("expected declaration"));
}

#[test]
fn test_missing_formatter_binary() {
    let gofmt = GoFmt::with_program("enumgen-no-such-formatter");
    let err = gofmt.format(b"package x\n").unwrap_err();
    assert!(matches!(err, FormatError::Spawn { .. }));
}
