//! Running the generator against scratch packages.

use enumgen::emitter::{FormatError, Formatter};
use enumgen::{RenderConfig, ResolutionError, WriteOutcome};
use enumgen_cli::driver::{GenerateOptions, generate};
use std::fs;
use tempfile::TempDir;

const PAINT: &str = r#"package paint

type Color int

const (
	Red Color = iota
	Green
	Blue
)

type Unused int
"#;

fn scratch() -> (TempDir, GenerateOptions) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/paint\n").unwrap();
    fs::write(dir.path().join("paint.go"), PAINT).unwrap();
    let options = GenerateOptions {
        pkg: dir.path().to_path_buf(),
        out: dir.path().join("enum_gen.go"),
        tags: Vec::new(),
        format: false,
    };
    (dir, options)
}

fn types(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_generates_integer_enum() {
    let (_dir, options) = scratch();
    let summary = generate(&options, &types(&["Color"]), &RenderConfig::default(), None).unwrap();
    assert_eq!(summary.outcome, WriteOutcome::Written);

    let out = fs::read_to_string(&options.out).unwrap();
    assert!(out.starts_with("// Code generated by enumgen. DO NOT EDIT.\n\npackage paint\n"));
    assert!(out.contains("\tcase Red:\n\t\treturn \"Red\"\n"));
    assert!(out.contains("\tcase \"Blue\":\n\t\treturn Blue, true\n"));
    assert!(out.contains("\t\treturn 0, false\n"));
    assert!(out.contains("var ColorValues = []Color{Red, Green, Blue}\n"));
}

#[test]
fn test_no_constants_writes_nothing() {
    let (_dir, options) = scratch();
    let err = generate(&options, &types(&["Color", "Unused"]), &RenderConfig::default(), None)
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ResolutionError>(),
        Some(&ResolutionError::NoConstants("Unused".to_string()))
    );
    assert!(!options.out.exists());
}

#[test]
fn test_rerun_is_unchanged() {
    let (_dir, options) = scratch();
    let config = RenderConfig::default();
    let first = generate(&options, &types(&["Color"]), &config, None).unwrap();
    assert_eq!(first.outcome, WriteOutcome::Written);
    let before = fs::read(&options.out).unwrap();

    let second = generate(&options, &types(&["Color"]), &config, None).unwrap();
    assert_eq!(second.outcome, WriteOutcome::Unchanged);
    assert_eq!(fs::read(&options.out).unwrap(), before);
}

#[test]
fn test_rerun_with_generated_file_in_package() {
    let (dir, options) = scratch();
    generate(&options, &types(&["Color"]), &RenderConfig::default(), None).unwrap();
    assert!(dir.path().join("enum_gen.go").exists());
    let again = generate(&options, &types(&["Color"]), &RenderConfig::default(), None).unwrap();
    assert_eq!(again.outcome, WriteOutcome::Unchanged);
}

struct Stamp;

impl Formatter for Stamp {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        let mut out = source.to_vec();
        out.extend_from_slice(b"// formatted\n");
        Ok(out)
    }
}

#[test]
fn test_formatter_output_is_written() {
    let (_dir, options) = scratch();
    generate(&options, &types(&["Color"]), &RenderConfig::default(), Some(&Stamp)).unwrap();
    assert!(fs::read_to_string(&options.out).unwrap().ends_with("// formatted\n"));
}

#[test]
fn test_build_tags_reach_the_loader() {
    let (dir, mut options) = scratch();
    fs::write(
        dir.path().join("extra.go"),
        "//go:build extra\n\npackage paint\n\nconst Purple Color = 3\n",
    )
    .unwrap();

    generate(&options, &types(&["Color"]), &RenderConfig::default(), None).unwrap();
    assert!(!fs::read_to_string(&options.out).unwrap().contains("Purple"));

    options.tags = vec!["extra".to_string()];
    generate(&options, &types(&["Color"]), &RenderConfig::default(), None).unwrap();
    assert!(fs::read_to_string(&options.out).unwrap().contains("case Purple:"));
}
