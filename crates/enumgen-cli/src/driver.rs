//! Resolve, render, assemble and write: one run of the generator.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use enumgen::binder::{BuildContext, EnumResolver, load_package};
use enumgen::emitter::{
    EnumDescriptor, Formatter, GoFmt, RenderConfig, WriteOutcome, assemble, render,
    write_if_changed,
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info_span};

/// A mistake in how the tool was invoked. The binary answers it with the
/// usage text rather than a plain diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Driver settings that are not part of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub pkg: PathBuf,
    pub out: PathBuf,
    pub tags: Vec<String>,
    pub format: bool,
}

impl GenerateOptions {
    pub fn from_args(args: &CliArgs) -> Self {
        GenerateOptions {
            pkg: args.pkg.clone(),
            out: args.out.clone(),
            tags: args.tags.clone(),
            format: args.format,
        }
    }

    fn validate(&self) -> Result<(), UsageError> {
        if self.pkg.as_os_str().is_empty() {
            return Err(UsageError("--pkg not set".to_string()));
        }
        if self.out.as_os_str().is_empty() {
            return Err(UsageError("--out not set".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub out: PathBuf,
    pub types: Vec<String>,
    pub outcome: WriteOutcome,
}

/// Run the generator as the command line describes.
pub fn run(args: &CliArgs) -> Result<GenerateSummary> {
    let options = GenerateOptions::from_args(args);
    let gofmt = GoFmt::default();
    let formatter: Option<&dyn Formatter> = if options.format { Some(&gofmt) } else { None };
    generate(&options, &args.types, &args.render_config(), formatter)
}

/// Generate methods for `types` into `options.out`. Nothing is written
/// unless every type resolves and renders.
pub fn generate(
    options: &GenerateOptions,
    types: &[String],
    config: &RenderConfig,
    formatter: Option<&dyn Formatter>,
) -> Result<GenerateSummary> {
    options.validate()?;
    if types.is_empty() {
        return Err(UsageError("no types given".to_string()).into());
    }
    let _span = info_span!("generate", pkg = %options.pkg.display(), out = %options.out.display())
        .entered();

    let ctx = BuildContext::from_env().with_tags(&options.tags);
    let table = load_package(&options.pkg, &ctx)
        .with_context(|| format!("loading package {}", options.pkg.display()))?;

    let mut rendered = Vec::with_capacity(types.len());
    for type_name in types {
        let resolved = table.resolve(type_name)?;
        let descriptor = EnumDescriptor::build(resolved);
        rendered.push(render(&descriptor, config)?);
    }

    let bytes = assemble(&rendered, &table.package_name, formatter)?;
    let outcome = write_if_changed(&options.out, &bytes)
        .with_context(|| format!("writing {}", options.out.display()))?;
    debug!(?outcome, "generate finished");

    Ok(GenerateSummary {
        out: options.out.clone(),
        types: types.to_vec(),
        outcome,
    })
}

/// Whether an error chain is a usage error.
pub fn is_usage_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<UsageError>().is_some()
}
