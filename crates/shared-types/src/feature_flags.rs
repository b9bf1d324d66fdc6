use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup. Every field defaults to
/// `false` so that a missing or incomplete config file disables all
/// optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Accept product image and receipt uploads into object storage.
    #[serde(default)]
    pub s3: bool,
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
}

/// Copy shown on the listing form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSettings {
    /// Payment instructions displayed when bank transfer is selected.
    #[serde(default = "default_bank_instructions")]
    pub bank_instructions: String,
}

fn default_bank_instructions() -> String {
    "Please make payment to Bank ABC 1234567, or True Money 610123456".to_string()
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            bank_instructions: default_bank_instructions(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub listing: ListingSettings,
}
