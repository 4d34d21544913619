use crate::args::{CliArgs, FlagArg};
use clap::Parser;
use enumgen::{FlagMode, RenderConfig};
use std::path::Path;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("enumgen").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_defaults_match_render_defaults() {
    let args = parse(&["Color"]);
    assert_eq!(args.pkg, Path::new("."));
    assert_eq!(args.out, Path::new("enum_gen.go"));
    assert!(args.tags.is_empty());
    assert!(args.format);
    assert_eq!(args.flag, FlagArg::Val);
    assert_eq!(args.types, vec!["Color"]);
    assert_eq!(args.render_config(), RenderConfig::default());
}

#[test]
fn test_bool_flag_forms() {
    let args = parse(&["--marshal", "--format=false", "--values=false", "Color", "Status"]);
    assert!(args.marshal);
    assert!(!args.format);
    assert!(!args.values);
    // A bare boolean flag never consumes the next word.
    assert_eq!(args.types, vec!["Color", "Status"]);
}

#[test]
fn test_flag_mode_names() {
    assert_eq!(parse(&["--flag", "get", "T"]).render_config().flag_mode, FlagMode::Get);
    assert_eq!(parse(&["--flag=none", "T"]).render_config().flag_mode, FlagMode::None);
    assert_eq!(parse(&["--flag", "value", "T"]).flag, FlagArg::Val);
    assert_eq!(parse(&["--flag", "VAL", "T"]).flag, FlagArg::Val);
    assert!(CliArgs::try_parse_from(["enumgen", "--flag", "both", "T"]).is_err());
}

#[test]
fn test_tags_split_on_commas() {
    let args = parse(&["--tags", "integration,linux", "T"]);
    assert_eq!(args.tags, vec!["integration", "linux"]);
}

#[test]
fn test_render_config_mapping() {
    let config = parse(&[
        "--name=false",
        "--lookup=false",
        "--isvalid=false",
        "--string=false",
        "--strvalues",
        "--flag",
        "none",
        "T",
    ])
    .render_config();
    assert_eq!(
        config,
        RenderConfig {
            enable_name: false,
            enable_lookup: false,
            enable_isvalid: false,
            enable_string: false,
            enable_values: true,
            enable_marshal: false,
            enable_values_string: true,
            flag_mode: FlagMode::None,
        }
    );
}

#[test]
fn test_usage_lists_generated_methods() {
    let usage = CliArgs::usage();
    assert!(usage.contains("Usage: enumgen"));
    assert!(usage.contains("func (v T) Lookup(name string) (T, bool)"));
    assert!(usage.contains("func (v *T) Set(s string) error"));
}
