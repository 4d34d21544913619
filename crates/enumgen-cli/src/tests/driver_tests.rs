use crate::driver::{GenerateOptions, UsageError, generate, is_usage_error};
use enumgen::{FlagMode, RenderConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const STATUS: &str = "package orders\n\ntype Status string\n\nconst (\n\tOpen Status = \"open\"\n\tDone Status = \"done\"\n)\n";

fn options(dir: &TempDir) -> GenerateOptions {
    GenerateOptions {
        pkg: dir.path().to_path_buf(),
        out: dir.path().join("enum_gen.go"),
        tags: Vec::new(),
        format: false,
    }
}

fn package() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("status.go"), STATUS).unwrap();
    dir
}

#[test]
fn test_empty_pkg_is_usage_error() {
    let dir = package();
    let opts = GenerateOptions {
        pkg: PathBuf::new(),
        ..options(&dir)
    };
    let err = generate(&opts, &["Status".to_string()], &RenderConfig::default(), None).unwrap_err();
    assert_eq!(
        err.downcast_ref::<UsageError>(),
        Some(&UsageError("--pkg not set".to_string()))
    );
}

#[test]
fn test_empty_out_is_usage_error() {
    let dir = package();
    let opts = GenerateOptions {
        out: PathBuf::new(),
        ..options(&dir)
    };
    let err = generate(&opts, &["Status".to_string()], &RenderConfig::default(), None).unwrap_err();
    assert!(is_usage_error(&err));
    assert_eq!(err.to_string(), "--out not set");
}

#[test]
fn test_no_types_is_usage_error() {
    let dir = package();
    let err = generate(&options(&dir), &[], &RenderConfig::default(), None).unwrap_err();
    assert!(is_usage_error(&err));
}

#[test]
fn test_set_without_is_valid_generates() {
    let dir = package();
    let config = RenderConfig {
        enable_isvalid: false,
        flag_mode: FlagMode::Value,
        ..RenderConfig::default()
    };
    generate(&options(&dir), &["Status".to_string()], &config, None).unwrap();
    let out = fs::read_to_string(dir.path().join("enum_gen.go")).unwrap();
    assert!(out.contains("func (v *Status) Set(s string) error {"));
    assert!(!out.contains("IsValid"));
}

#[test]
fn test_string_constant_with_raw_bytes() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("status.go"),
        "package orders\n\ntype Status string\n\nconst (\n\tActive Status = \"active\"\n\tRaw Status = \"\\xff\"\n)\n",
    )
    .unwrap();
    let config = RenderConfig {
        enable_values_string: true,
        ..RenderConfig::default()
    };
    generate(&options(&dir), &["Status".to_string()], &config, None).unwrap();
    let out = fs::read_to_string(dir.path().join("enum_gen.go")).unwrap();
    assert!(out.contains("\tcase Raw:\n\t\treturn \"\\xff\"\n"));
    assert!(out.contains("const StatusValuesString = \"active,\\xff\"\n"));
}

#[test]
fn test_failure_chain_names_cause_once() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("size.go"),
        "package orders\n\ntype Size int8\n\nconst Huge Size = 1000\n",
    )
    .unwrap();
    let err = generate(
        &options(&dir),
        &["Size".to_string()],
        &RenderConfig::default(),
        None,
    )
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("constant Huge of type Size: "), "{message}");
    assert_eq!(message.matches("overflows").count(), 1, "{message}");
}

#[test]
fn test_resolution_failure_is_not_usage_error() {
    let dir = package();
    let err = generate(
        &options(&dir),
        &["Missing".to_string()],
        &RenderConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(!is_usage_error(&err));
    assert_eq!(err.to_string(), "type Missing not found");
}
