//! The catalog of Go code fragments.
//!
//! Each entry is a pure generator plus the conditions under which it runs.
//! Catalog order is emission order.

mod common;
mod integer;
mod string;

use crate::config::RenderConfig;
use crate::descriptor::EnumDescriptor;
use crate::source_writer::GoWriter;
use enumgen_binder::UnderlyingKind;
use std::fmt;

/// Receiver name used by every generated method.
pub const RECEIVER: &str = "v";
/// What `String` returns for undeclared values.
pub const UNKNOWN: &str = "<unknown>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentId {
    Name,
    Lookup,
    IsValid,
    Values,
    String,
    Marshal,
    Set,
    Get,
    ValuesString,
}

pub type EmitFn = fn(&mut GoWriter, &EnumDescriptor) -> fmt::Result;

pub struct FragmentSpec {
    pub id: FragmentId,
    /// `None` applies to every kind.
    pub kind: Option<UnderlyingKind>,
    pub enabled: fn(&RenderConfig, &EnumDescriptor) -> bool,
    /// Go packages the fragment's code uses.
    pub imports: &'static [&'static str],
    pub emit: EmitFn,
}

impl FragmentSpec {
    pub fn applies(&self, config: &RenderConfig, descriptor: &EnumDescriptor) -> bool {
        self.kind.is_none_or(|kind| kind == descriptor.kind) && (self.enabled)(config, descriptor)
    }
}

pub static FRAGMENTS: &[FragmentSpec] = &[
    FragmentSpec {
        id: FragmentId::Name,
        kind: None,
        enabled: |config, _| config.enable_name,
        imports: &[],
        emit: common::emit_name,
    },
    FragmentSpec {
        id: FragmentId::Lookup,
        kind: None,
        enabled: |config, _| config.enable_lookup,
        imports: &[],
        emit: common::emit_lookup,
    },
    FragmentSpec {
        id: FragmentId::IsValid,
        kind: None,
        enabled: |config, _| config.enable_isvalid,
        imports: &[],
        emit: common::emit_is_valid,
    },
    FragmentSpec {
        id: FragmentId::Values,
        kind: None,
        enabled: |config, descriptor| config.enable_values && descriptor.is_named,
        imports: &[],
        emit: common::emit_values,
    },
    FragmentSpec {
        id: FragmentId::String,
        kind: Some(UnderlyingKind::Integer),
        enabled: |config, _| config.enable_string,
        imports: &[],
        emit: integer::emit_string,
    },
    FragmentSpec {
        id: FragmentId::String,
        kind: Some(UnderlyingKind::String),
        enabled: |config, _| config.enable_string,
        imports: &[],
        emit: string::emit_string,
    },
    FragmentSpec {
        id: FragmentId::Marshal,
        kind: Some(UnderlyingKind::Integer),
        enabled: |config, _| config.enable_marshal,
        imports: &["fmt"],
        emit: integer::emit_marshal,
    },
    FragmentSpec {
        id: FragmentId::Marshal,
        kind: Some(UnderlyingKind::String),
        enabled: |config, _| config.enable_marshal,
        imports: &["fmt"],
        emit: string::emit_marshal,
    },
    FragmentSpec {
        id: FragmentId::Set,
        kind: Some(UnderlyingKind::Integer),
        enabled: |config, _| config.flag_mode.emits_set(),
        imports: &["strconv", "strings"],
        emit: integer::emit_set,
    },
    FragmentSpec {
        id: FragmentId::Set,
        kind: Some(UnderlyingKind::String),
        enabled: |config, _| config.flag_mode.emits_set(),
        imports: &["fmt"],
        emit: string::emit_set,
    },
    FragmentSpec {
        id: FragmentId::Get,
        kind: None,
        enabled: |config, _| config.flag_mode.emits_get(),
        imports: &[],
        emit: common::emit_get,
    },
    FragmentSpec {
        id: FragmentId::ValuesString,
        kind: Some(UnderlyingKind::String),
        enabled: |config, _| config.enable_values_string,
        imports: &[],
        emit: string::emit_values_string,
    },
];

/// Constants in name order, keeping only the first of any that share a
/// value. Go rejects duplicate constant cases in a `switch` on the value.
pub(crate) fn distinct_by_value(
    descriptor: &EnumDescriptor,
) -> impl Iterator<Item = &crate::descriptor::ConstantValue> {
    let mut seen = rustc_hash::FxHashSet::default();
    descriptor
        .by_name()
        .filter(move |constant| seen.insert(constant.raw_value.as_str()))
}
