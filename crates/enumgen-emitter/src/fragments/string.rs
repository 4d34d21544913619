//! Fragments for enums over string types.

use super::{RECEIVER, UNKNOWN, distinct_by_value};
use crate::descriptor::EnumDescriptor;
use crate::source_writer::GoWriter;
use enumgen_binder::ConstValue;
use enumgen_common::quote_go_string;
use std::fmt::{self, Write};

pub(super) fn emit_string(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    writeln!(w, "// String returns the value of {RECEIVER}.")?;
    writeln!(w, "func ({RECEIVER} {ty}) String() string {{")?;
    w.increase_indent();
    writeln!(w, "switch {RECEIVER} {{")?;
    for constant in distinct_by_value(d) {
        writeln!(w, "case {}:", constant.name)?;
        w.increase_indent();
        writeln!(w, "return {}", constant.raw_value)?;
        w.decrease_indent();
    }
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(w, "return {}", quote_go_string(UNKNOWN))?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    w.decrease_indent();
    writeln!(w, "}}")
}

pub(super) fn emit_marshal(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    writeln!(w, "// MarshalText implements encoding.TextMarshaler.")?;
    writeln!(w, "func ({RECEIVER} {ty}) MarshalText() ([]byte, error) {{")?;
    w.increase_indent();
    writeln!(w, "switch {RECEIVER} {{")?;
    for constant in distinct_by_value(d) {
        writeln!(w, "case {}:", constant.name)?;
        w.increase_indent();
        writeln!(w, "return []byte({}), nil", constant.raw_value)?;
        w.decrease_indent();
    }
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(
        w,
        "return nil, fmt.Errorf(\"invalid {ty} value %q\", string({RECEIVER}))"
    )?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    writeln!(w)?;

    writeln!(w, "// UnmarshalText implements encoding.TextUnmarshaler.")?;
    writeln!(w, "func ({RECEIVER} *{ty}) UnmarshalText(text []byte) error {{")?;
    w.increase_indent();
    writeln!(w, "switch string(text) {{")?;
    for constant in distinct_by_value(d) {
        writeln!(w, "case {}:", constant.raw_value)?;
        w.increase_indent();
        writeln!(w, "*{RECEIVER} = {}", constant.name)?;
        w.decrease_indent();
    }
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(w, "return fmt.Errorf(\"invalid {ty} value %q\", text)")?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    writeln!(w, "return nil")?;
    w.decrease_indent();
    writeln!(w, "}}")
}

pub(super) fn emit_set(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    let cases: Vec<&str> = distinct_by_value(d).map(|c| c.name.as_str()).collect();
    writeln!(w, "// Set implements flag.Value. It accepts only declared values.")?;
    writeln!(w, "func ({RECEIVER} *{ty}) Set(s string) error {{")?;
    w.increase_indent();
    writeln!(w, "value := {ty}(s)")?;
    writeln!(w, "switch value {{")?;
    writeln!(w, "case {}:", cases.join(", "))?;
    w.increase_indent();
    writeln!(w, "*{RECEIVER} = value")?;
    writeln!(w, "return nil")?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    writeln!(
        w,
        "return fmt.Errorf(\"enum %T received invalid value %q\", value, s)"
    )?;
    w.decrease_indent();
    writeln!(w, "}}")
}

pub(super) fn emit_values_string(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    let joined = d
        .by_value()
        .filter_map(|constant| match &constant.value {
            ConstValue::Str(value) => Some(value.as_slice()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(&b',');
    writeln!(w, "// {ty}ValuesString lists the declared {ty} values, comma-separated.")?;
    writeln!(w, "const {ty}ValuesString = {}", quote_go_string(&joined))?;
    writeln!(w)?;
    writeln!(w, "// ValuesString returns {ty}ValuesString.")?;
    writeln!(w, "func ({ty}) ValuesString() string {{")?;
    w.increase_indent();
    writeln!(w, "return {ty}ValuesString")?;
    w.decrease_indent();
    writeln!(w, "}}")
}
