//! Logging setup for the enumgen binary.
//!
//! Nothing is installed unless `ENUMGEN_LOG` or `RUST_LOG` carries filter
//! directives; `ENUMGEN_LOG` wins when both are set. `ENUMGEN_LOG_FORMAT`
//! picks the layout: `text` (default), `tree` (indented spans via
//! `tracing-tree`) or `json` (one object per event).
//!
//! ```bash
//! ENUMGEN_LOG=debug ENUMGEN_LOG_FORMAT=tree enumgen Color
//! ENUMGEN_LOG="enumgen_binder=trace" enumgen --pkg ./paint Color
//! ```
//!
//! Everything is written to stderr; stdout is reserved for `--show-config`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// What the environment asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `RUST_LOG`-style filter directives.
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Read settings through `var`, which returns a variable's value if set.
    /// `None` means logging stays off.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = var("ENUMGEN_LOG").or_else(|| var("RUST_LOG"))?;
        let format = var("ENUMGEN_LOG_FORMAT")
            .map(|name| LogFormat::parse(&name))
            .unwrap_or(LogFormat::Text);
        Some(LogSettings { directives, format })
    }

    fn install(self) {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);
        let tree = (self.format == LogFormat::Tree).then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true)
        });
        let json = (self.format == LogFormat::Json)
            .then(|| fmt::layer().json().with_writer(std::io::stderr));
        let text = (self.format == LogFormat::Text)
            .then(|| fmt::layer().with_writer(std::io::stderr));

        // A subscriber installed earlier (tests, embedding) is left in place.
        let _ = Registry::default()
            .with(filter)
            .with(tree)
            .with(json)
            .with(text)
            .try_init();
    }
}

/// Install the global subscriber when the environment enables logging.
pub fn init_tracing() {
    if let Some(settings) = LogSettings::from_vars(|name| std::env::var(name).ok()) {
        settings.install();
    }
}
