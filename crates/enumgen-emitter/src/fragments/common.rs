//! Fragments shared by every underlying kind.

use super::{RECEIVER, distinct_by_value};
use crate::descriptor::EnumDescriptor;
use crate::source_writer::GoWriter;
use enumgen_common::quote_go_string;
use std::fmt::{self, Write};

pub(super) fn emit_name(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    writeln!(w, "// Name returns the declared name of {RECEIVER}, or \"\" if it has none.")?;
    writeln!(w, "func ({RECEIVER} {ty}) Name() string {{")?;
    w.increase_indent();
    writeln!(w, "switch {RECEIVER} {{")?;
    for constant in distinct_by_value(d) {
        writeln!(w, "case {}:", constant.name)?;
        w.increase_indent();
        writeln!(w, "return {}", quote_go_string(&constant.name))?;
        w.decrease_indent();
    }
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(w, "return \"\"")?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    w.decrease_indent();
    writeln!(w, "}}")
}

pub(super) fn emit_lookup(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    writeln!(w, "// Lookup returns the {ty} declared as name, and whether there is one.")?;
    writeln!(
        w,
        "func ({RECEIVER} {ty}) Lookup(name string) (value {ty}, ok bool) {{"
    )?;
    w.increase_indent();
    writeln!(w, "switch name {{")?;
    for constant in d.by_name() {
        writeln!(w, "case {}:", quote_go_string(&constant.name))?;
        w.increase_indent();
        writeln!(w, "return {}, true", constant.name)?;
        w.decrease_indent();
    }
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(w, "return {}, false", d.empty)?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    w.decrease_indent();
    writeln!(w, "}}")
}

pub(super) fn emit_is_valid(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    let cases: Vec<&str> = distinct_by_value(d).map(|c| c.name.as_str()).collect();
    writeln!(w, "// IsValid reports whether {RECEIVER} is a declared {ty}.")?;
    writeln!(w, "func ({RECEIVER} {ty}) IsValid() bool {{")?;
    w.increase_indent();
    writeln!(w, "switch {RECEIVER} {{")?;
    writeln!(w, "case {}:", cases.join(", "))?;
    w.increase_indent();
    writeln!(w, "return true")?;
    w.decrease_indent();
    writeln!(w, "default:")?;
    w.increase_indent();
    writeln!(w, "return false")?;
    w.decrease_indent();
    writeln!(w, "}}")?;
    w.decrease_indent();
    writeln!(w, "}}")
}

pub(super) fn emit_values(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    let ty = &d.name;
    let names: Vec<&str> = d.by_value().map(|c| c.name.as_str()).collect();
    writeln!(w, "// {ty}Values lists the declared {ty} values in value order.")?;
    writeln!(w, "var {ty}Values = []{ty}{{{}}}", names.join(", "))
}

pub(super) fn emit_get(w: &mut GoWriter, d: &EnumDescriptor) -> fmt::Result {
    writeln!(w, "// Get implements flag.Getter.")?;
    writeln!(w, "func ({RECEIVER} {}) Get() interface{{}} {{", d.name)?;
    w.increase_indent();
    writeln!(w, "return {RECEIVER}")?;
    w.decrease_indent();
    writeln!(w, "}}")
}
