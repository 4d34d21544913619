//! End-to-end rendering from Go source to the assembled file.

use enumgen_binder::{BinderState, EnumResolver, SymbolTable};
use enumgen_emitter::{EnumDescriptor, FlagMode, RenderConfig, assemble, render};
use enumgen_parser::parse_source_file;

const SOURCE: &str = r#"package paint

type Color int

const (
	Red Color = iota
	Green
	Blue
)

type Status string

const (
	Closed Status = "closed"
	Active Status = "active"
)
"#;

fn table() -> SymbolTable {
    let file = parse_source_file("paint.go", SOURCE).unwrap();
    BinderState::new("paint", "example.com/paint")
        .bind(&[file])
        .unwrap()
}

fn generate(types: &[&str], config: &RenderConfig) -> String {
    let table = table();
    let rendered: Vec<_> = types
        .iter()
        .map(|name| {
            let descriptor = EnumDescriptor::build(table.resolve(name).unwrap());
            render(&descriptor, config).unwrap()
        })
        .collect();
    String::from_utf8(assemble(&rendered, &table.package_name, None).unwrap()).unwrap()
}

const COLOR_GOLDEN: &str = r#"// Code generated by enumgen. DO NOT EDIT.

package paint

// Name returns the declared name of v, or "" if it has none.
func (v Color) Name() string {
	switch v {
	case Blue:
		return "Blue"
	case Green:
		return "Green"
	case Red:
		return "Red"
	default:
		return ""
	}
}

// Lookup returns the Color declared as name, and whether there is one.
func (v Color) Lookup(name string) (value Color, ok bool) {
	switch name {
	case "Blue":
		return Blue, true
	case "Green":
		return Green, true
	case "Red":
		return Red, true
	default:
		return 0, false
	}
}

// IsValid reports whether v is a declared Color.
func (v Color) IsValid() bool {
	switch v {
	case Blue, Green, Red:
		return true
	default:
		return false
	}
}

// ColorValues lists the declared Color values in value order.
var ColorValues = []Color{Red, Green, Blue}
"#;

#[test]
fn test_integer_enum_golden() {
    let config = RenderConfig {
        enable_string: false,
        flag_mode: FlagMode::None,
        ..RenderConfig::default()
    };
    assert_eq!(generate(&["Color"], &config), COLOR_GOLDEN);
}

#[test]
fn test_string_enum_values_string() {
    let config = RenderConfig {
        enable_values_string: true,
        ..RenderConfig::default()
    };
    let out = generate(&["Status"], &config);
    assert!(out.contains("const StatusValuesString = \"active,closed\"\n"));
    assert!(out.contains("var StatusValues = []Status{Active, Closed}\n"));
}

#[test]
fn test_multiple_types_share_one_file() {
    let out = generate(&["Status", "Color"], &RenderConfig::default());
    assert_eq!(out.matches("package paint").count(), 1);
    assert_eq!(out.matches("import (").count(), 1);
    assert!(out.find("func (v Status) Name()") < out.find("func (v Color) Name()"));
}

#[test]
fn test_render_config_serialization() {
    let json = serde_json::to_value(RenderConfig::default()).unwrap();
    assert_eq!(json["enable-name"], true);
    assert_eq!(json["enable-marshal"], false);
    assert_eq!(json["flag-mode"], "value");

    let parsed: RenderConfig =
        serde_json::from_str(r#"{"enable-marshal": true, "flag-mode": "get"}"#).unwrap();
    assert!(parsed.enable_marshal);
    assert!(parsed.enable_lookup);
    assert_eq!(parsed.flag_mode, FlagMode::Get);
}
