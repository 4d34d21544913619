//! Fragments for enums over integer types.

use super::{RECEIVER, UNKNOWN, distinct_by_value};
use crate::descriptor::EnumDescriptor;
use crate::source_writer::GoWriter;
use enumgen_common::quote_go_string;
use rustc_hash::FxHashSet;
use std::fmt::{self, Write};

pub(super) fn emit_string(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    writeln!(w, "// String returns the name and value of {RECEIVER}, such as \"Name(1)\".")?;
    writeln!(w, "func ({RECEIVER} {ty}) String() string {{")?;
    w.increase_indent();
    writeln!(w, "switch {RECEIVER} {{")?;
    for constant in distinct_by_value(d) {
        writeln!(w, "case {}:", constant.name)?;
        w.increase_indent();
        let text = format!("{}({})", constant.name, constant.raw_value);
        writeln!(w, "return {}", quote_go_string(&text))?;
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
        writeln!(w, "return []byte({}), nil", quote_go_string(&constant.raw_value))?;
        w.decrease_indent();
    }
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(
        w,
        "return nil, fmt.Errorf(\"invalid {ty} value %d\", {RECEIVER})"
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
    let mut seen_digits = FxHashSet::default();
    for constant in d.by_name() {
        let mut labels = vec![quote_go_string(&constant.name)];
        if seen_digits.insert(constant.raw_value.as_str()) {
            labels.push(quote_go_string(&constant.raw_value));
        }
        writeln!(w, "case {}:", labels.join(", "))?;
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
    writeln!(
        w,
        "// Set implements flag.Value. It accepts a name in any case, or a number."
    )?;
    writeln!(w, "func ({RECEIVER} *{ty}) Set(s string) error {{")?;
    w.increase_indent();
    writeln!(w, "switch strings.ToLower(s) {{")?;
    let mut seen = FxHashSet::default();
    for constant in d.by_name() {
        if !seen.insert(constant.lower_name.as_str()) {
            continue;
        }
        writeln!(w, "case {}:", quote_go_string(&constant.lower_name))?;
        w.increase_indent();
        writeln!(w, "*{RECEIVER} = {}", constant.name)?;
        writeln!(w, "return nil")?;
        w.decrease_indent();
    }
    writeln!(w, "}}")?;
    writeln!(w, "n, err := strconv.ParseInt(s, 10, {})", d.basic.parse_bits())?;
    writeln!(w, "if err != nil {{")?;
    w.increase_indent();
    writeln!(w, "return err")?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    writeln!(w, "*{RECEIVER} = {ty}(n)")?;
    writeln!(w, "return nil")?;
    w.decrease_indent();
    writeln!(w, "}}")
}
