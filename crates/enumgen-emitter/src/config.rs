//! Rendering options.

use serde::{Deserialize, Serialize};

/// Which `flag` interfaces the generated type implements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagMode {
    None,
    /// `flag.Value`: `Set`.
    #[default]
    Value,
    /// `flag.Getter`: `Set` and `Get`.
    Get,
}

impl FlagMode {
    pub const fn emits_set(self) -> bool {
        matches!(self, FlagMode::Value | FlagMode::Get)
    }

    pub const fn emits_get(self) -> bool {
        matches!(self, FlagMode::Get)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenderConfig {
    pub enable_name: bool,
    pub enable_lookup: bool,
    pub enable_isvalid: bool,
    pub enable_string: bool,
    pub enable_values: bool,
    pub enable_marshal: bool,
    pub enable_values_string: bool,
    pub flag_mode: FlagMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            enable_name: true,
            enable_lookup: true,
            enable_isvalid: true,
            enable_string: true,
            enable_values: true,
            enable_marshal: false,
            enable_values_string: false,
            flag_mode: FlagMode::Value,
        }
    }
}
