//! Running the fragment catalog over one enum.

use crate::config::RenderConfig;
use crate::descriptor::EnumDescriptor;
use crate::fragments::{FRAGMENTS, FragmentId, FragmentSpec};
use crate::source_writer::GoWriter;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("rendering {type_name}: formatter error")]
    Template { type_name: String },
}

/// Go source for one enum's methods, without package clause or imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEnum {
    pub type_name: String,
    pub source: String,
    pub imports: BTreeSet<&'static str>,
    pub fragments: Vec<FragmentId>,
}

pub fn render(
    descriptor: &EnumDescriptor,
    config: &RenderConfig,
) -> Result<RenderedEnum, RenderError> {
    let selected: Vec<&FragmentSpec> = FRAGMENTS
        .iter()
        .filter(|spec| spec.applies(config, descriptor))
        .collect();

    let mut writer = GoWriter::new();
    let mut imports = BTreeSet::new();
    for spec in &selected {
        if !writer.is_empty() {
            writer.write_line();
        }
        (spec.emit)(&mut writer, descriptor).map_err(|_| RenderError::Template {
            type_name: descriptor.name.clone(),
        })?;
        imports.extend(spec.imports.iter().copied());
    }

    let fragments: Vec<FragmentId> = selected.iter().map(|spec| spec.id).collect();
    debug!(
        type_name = %descriptor.name,
        ?fragments,
        imports = ?imports,
        "rendered enum"
    );
    Ok(RenderedEnum {
        type_name: descriptor.name.clone(),
        source: writer.finish(),
        imports,
        fragments,
    })
}
