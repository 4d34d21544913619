//! The normalized form of a resolved enum.

use enumgen_binder::{BasicKind, ConstValue, ResolvedEnum, UnderlyingKind};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantValue {
    pub name: String,
    /// Go literal for the value: decimal text or a quoted string.
    pub raw_value: String,
    pub lower_name: String,
    pub value: ConstValue,
}

/// Everything the fragments need to know about one enum type.
///
/// `values` keeps declaration order. The two orderings are index lists into
/// it: `name_order` by byte-wise name, `value_order` by value with ties
/// broken by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub full_name: String,
    pub name: String,
    pub kind: UnderlyingKind,
    pub basic: BasicKind,
    /// Go literal returned by lookups that miss.
    pub empty: &'static str,
    pub is_named: bool,
    pub values: Vec<ConstantValue>,
    name_order: Vec<usize>,
    value_order: Vec<usize>,
}

impl EnumDescriptor {
    pub fn build(resolved: ResolvedEnum) -> Self {
        let empty = match resolved.kind {
            UnderlyingKind::Integer => "0",
            UnderlyingKind::String => "\"\"",
        };
        let values: Vec<ConstantValue> = resolved
            .constants
            .into_iter()
            .map(|raw| ConstantValue {
                lower_name: go_to_lower(&raw.name),
                name: raw.name,
                raw_value: raw.literal,
                value: raw.value,
            })
            .collect();

        let mut name_order: Vec<usize> = (0..values.len()).collect();
        name_order.sort_by(|&a, &b| values[a].name.cmp(&values[b].name));

        let mut value_order: Vec<usize> = (0..values.len()).collect();
        value_order.sort_by(|&a, &b| {
            compare_values(&values[a].value, &values[b].value)
                .then_with(|| values[a].name.cmp(&values[b].name))
        });

        EnumDescriptor {
            full_name: resolved.full_name,
            name: resolved.name,
            kind: resolved.kind,
            basic: resolved.basic,
            empty,
            is_named: resolved.is_named,
            values,
            name_order,
            value_order,
        }
    }

    pub fn by_name(&self) -> impl Iterator<Item = &ConstantValue> {
        self.name_order.iter().map(|&idx| &self.values[idx])
    }

    pub fn by_value(&self) -> impl Iterator<Item = &ConstantValue> {
        self.value_order.iter().map(|&idx| &self.values[idx])
    }
}

fn compare_values(a: &ConstValue, b: &ConstValue) -> Ordering {
    match (a, b) {
        (ConstValue::Int(a), ConstValue::Int(b)) => a.cmp(b),
        (ConstValue::Str(a), ConstValue::Str(b)) => a.cmp(b),
        (ConstValue::Bool(a), ConstValue::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// `strings.ToLower`: each rune maps on its own, with no context-sensitive
/// forms such as a final sigma.
fn go_to_lower(name: &str) -> String {
    name.chars()
        .map(|ch| ch.to_lowercase().next().unwrap_or(ch))
        .collect()
}
