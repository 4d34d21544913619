use crate::test_fixtures::{color_enum, resolved, status_enum};
use crate::{EnumDescriptor, FlagMode, FragmentId, RenderConfig, render};
use enumgen_binder::{BasicKind, ConstValue};

fn only(config: impl FnOnce(&mut RenderConfig)) -> RenderConfig {
    let mut c = RenderConfig {
        enable_name: false,
        enable_lookup: false,
        enable_isvalid: false,
        enable_string: false,
        enable_values: false,
        enable_marshal: false,
        enable_values_string: false,
        flag_mode: FlagMode::None,
    };
    config(&mut c);
    c
}

#[test]
fn test_default_fragments_for_integer_enum() {
    let rendered = render(&color_enum(), &RenderConfig::default()).unwrap();
    assert_eq!(
        rendered.fragments,
        vec![
            FragmentId::Name,
            FragmentId::Lookup,
            FragmentId::IsValid,
            FragmentId::Values,
            FragmentId::String,
            FragmentId::Set,
        ]
    );
    let imports: Vec<&str> = rendered.imports.iter().copied().collect();
    assert_eq!(imports, vec!["strconv", "strings"]);
}

#[test]
fn test_name_lookup_and_values_arms() {
    let rendered = render(&color_enum(), &RenderConfig::default()).unwrap();
    let src = &rendered.source;
    assert!(src.contains("func (v Color) Name() string {\n\tswitch v {\n\tcase Blue:\n\t\treturn \"Blue\"\n"));
    assert!(src.contains("\tcase Red:\n\t\treturn \"Red\"\n\tdefault:\n\t\treturn \"\"\n"));
    assert!(src.contains("\tcase \"Green\":\n\t\treturn Green, true\n"));
    assert!(src.contains("\tdefault:\n\t\treturn 0, false\n"));
    assert!(src.contains("\tcase Blue, Green, Red:\n\t\treturn true\n"));
    assert!(src.contains("var ColorValues = []Color{Red, Green, Blue}\n"));
    assert!(src.contains("\t\treturn \"Green(1)\"\n"));
    assert!(src.contains("\t\treturn \"<unknown>\"\n"));
}

#[test]
fn test_rendering_is_deterministic() {
    let config = RenderConfig {
        enable_marshal: true,
        flag_mode: FlagMode::Get,
        ..RenderConfig::default()
    };
    let first = render(&color_enum(), &config).unwrap();
    let second = render(&color_enum(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_switch_arms_cover_every_constant() {
    let config = RenderConfig {
        enable_marshal: true,
        ..RenderConfig::default()
    };
    let src = render(&color_enum(), &config).unwrap().source;
    for name in ["Red", "Green", "Blue"] {
        // Name, String, MarshalText
        assert_eq!(src.matches(&format!("\tcase {name}:\n")).count(), 3, "{name}");
        assert_eq!(src.matches(&format!("\tcase \"{name}\":\n")).count(), 1, "{name}");
        assert!(src.contains(&format!("\t*v = {name}\n")));
    }
}

#[test]
fn test_string_enum_fragments() {
    let config = RenderConfig {
        enable_marshal: true,
        enable_values_string: true,
        ..RenderConfig::default()
    };
    let rendered = render(&status_enum(), &config).unwrap();
    let src = &rendered.source;
    assert!(src.contains("\tcase Active:\n\t\treturn \"active\"\n"));
    assert!(src.contains("\tdefault:\n\t\treturn \"\", false\n"));
    assert!(src.contains("\tcase \"closed\":\n\t\t*v = Closed\n"));
    assert!(src.contains("const StatusValuesString = \"active,closed\"\n"));
    assert!(src.contains("func (Status) ValuesString() string {\n\treturn StatusValuesString\n}\n"));
    assert!(src.contains(
        "\tvalue := Status(s)\n\tswitch value {\n\tcase Active, Closed:\n\t\t*v = value\n\t\treturn nil\n\t}\n"
    ));
    assert!(src.contains("enum %T received invalid value %q"));
    let imports: Vec<&str> = rendered.imports.iter().copied().collect();
    assert_eq!(imports, vec!["fmt"]);
}

#[test]
fn test_values_string_is_noop_for_integers() {
    let config = only(|c| c.enable_values_string = true);
    let rendered = render(&color_enum(), &config).unwrap();
    assert!(rendered.source.is_empty());
    assert!(rendered.fragments.is_empty());
}

#[test]
fn test_values_list_skipped_for_alias() {
    let mut color = color_enum();
    color.is_named = false;
    let rendered = render(&color, &RenderConfig::default()).unwrap();
    assert!(!rendered.fragments.contains(&FragmentId::Values));
    assert!(!rendered.source.contains("ColorValues"));
}

#[test]
fn test_get_mode_implies_set() {
    let rendered = render(&color_enum(), &only(|c| c.flag_mode = FlagMode::Get)).unwrap();
    assert_eq!(rendered.fragments, vec![FragmentId::Set, FragmentId::Get]);
    assert!(rendered.source.contains("func (v Color) Get() interface{} {\n\treturn v\n}\n"));

    let none = render(&color_enum(), &only(|_| {})).unwrap();
    assert!(!none.source.contains("Set("));
}

#[test]
fn test_string_set_does_not_need_is_valid() {
    let config = RenderConfig {
        enable_isvalid: false,
        ..RenderConfig::default()
    };
    let rendered = render(&status_enum(), &config).unwrap();
    assert!(!rendered.fragments.contains(&FragmentId::IsValid));
    assert!(rendered.fragments.contains(&FragmentId::Set));
    assert!(!rendered.source.contains("IsValid"));
    assert!(rendered.source.contains("\tswitch value {\n\tcase Active, Closed:\n"));
    assert!(render(&color_enum(), &config).is_ok());
}

#[test]
fn test_set_parse_bits_follow_basic_type() {
    let small = EnumDescriptor::build(resolved(
        "Small",
        BasicKind::Int8,
        &[("One", ConstValue::Int(1))],
    ));
    let set = only(|c| c.flag_mode = FlagMode::Value);
    assert!(render(&small, &set).unwrap().source.contains("strconv.ParseInt(s, 10, 8)"));
    assert!(render(&color_enum(), &set).unwrap().source.contains("strconv.ParseInt(s, 10, 0)"));

    let wide = EnumDescriptor::build(resolved(
        "Wide",
        BasicKind::Uint32,
        &[("Max", ConstValue::Int(4_294_967_295))],
    ));
    assert!(render(&wide, &set).unwrap().source.contains("strconv.ParseInt(s, 10, 32)"));
}

#[test]
fn test_set_skips_names_that_collide_when_lowercased() {
    let d = EnumDescriptor::build(resolved(
        "Case",
        BasicKind::Int,
        &[("UP", ConstValue::Int(0)), ("Up", ConstValue::Int(1))],
    ));
    let src = render(&d, &only(|c| c.flag_mode = FlagMode::Value)).unwrap().source;
    assert_eq!(src.matches("case \"up\":").count(), 1);
    assert!(src.contains("case \"up\":\n\t\t*v = UP\n"));
}

#[test]
fn test_shared_values_emit_one_case() {
    let d = EnumDescriptor::build(resolved(
        "Level",
        BasicKind::Int,
        &[
            ("Default", ConstValue::Int(1)),
            ("Info", ConstValue::Int(1)),
            ("Debug", ConstValue::Int(0)),
        ],
    ));
    let config = RenderConfig {
        enable_marshal: true,
        ..RenderConfig::default()
    };
    let src = render(&d, &config).unwrap().source;
    assert!(src.contains("\tcase Debug, Default:\n"));
    assert!(!src.contains("\tcase Info:\n"));
    // Lookup and UnmarshalText still accept every name.
    assert!(src.contains("\tcase \"Info\":\n\t\treturn Info, true\n"));
    assert!(src.contains("\tcase \"Info\":\n\t\t*v = Info\n"));
    assert_eq!(src.matches("\"1\"").count(), 2);
}

#[test]
fn test_marshal_integer_round_trip_text() {
    let src = render(&color_enum(), &only(|c| c.enable_marshal = true)).unwrap().source;
    assert!(src.contains("\tcase Green:\n\t\treturn []byte(\"1\"), nil\n"));
    assert!(src.contains("\tcase \"Green\", \"1\":\n\t\t*v = Green\n"));
    assert!(src.contains("return nil, fmt.Errorf(\"invalid Color value %d\", v)"));
}
