//! Combining rendered enums into one Go source file.

use crate::render::RenderedEnum;
use std::collections::BTreeSet;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

pub const GENERATED_MARKER: &str = "// Code generated by enumgen. DO NOT EDIT.";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("running {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} failed: {stderr}")]
    Failed { program: String, stderr: String },
}

/// Post-processes assembled source, such as a pretty-printer.
pub trait Formatter {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError>;
}

/// Pipes source through the `gofmt` binary.
#[derive(Debug, Clone)]
pub struct GoFmt {
    program: String,
}

impl Default for GoFmt {
    fn default() -> Self {
        GoFmt {
            program: "gofmt".to_string(),
        }
    }
}

impl GoFmt {
    pub fn with_program(program: impl Into<String>) -> Self {
        GoFmt {
            program: program.into(),
        }
    }
}

impl Formatter for GoFmt {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        let spawn_error = |source| FormatError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // gofmt reads all input before writing, so a full write cannot deadlock.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source).map_err(spawn_error)?;
        }
        let output = child.wait_with_output().map_err(spawn_error)?;
        if !output.status.success() {
            return Err(FormatError::Failed {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        debug!(program = %self.program, bytes = output.stdout.len(), "formatted output");
        Ok(output.stdout)
    }
}

/// Marker comment, package clause, imports, then each enum in order.
pub fn assemble(
    enums: &[RenderedEnum],
    package_name: &str,
    formatter: Option<&dyn Formatter>,
) -> Result<Vec<u8>, FormatError> {
    let mut out = String::new();
    out.push_str(GENERATED_MARKER);
    out.push_str("\n\npackage ");
    out.push_str(package_name);
    out.push('\n');

    let imports: BTreeSet<&str> = enums
        .iter()
        .flat_map(|rendered| rendered.imports.iter().copied())
        .collect();
    if imports.len() == 1
        && let Some(import) = imports.first()
    {
        out.push_str(&format!("\nimport \"{import}\"\n"));
    } else if !imports.is_empty() {
        out.push_str("\nimport (\n");
        for import in &imports {
            out.push_str(&format!("\t\"{import}\"\n"));
        }
        out.push_str(")\n");
    }

    for rendered in enums {
        out.push('\n');
        out.push_str(&rendered.source);
    }

    let bytes = out.into_bytes();
    match formatter {
        Some(formatter) => formatter.format(&bytes),
        None => Ok(bytes),
    }
}
