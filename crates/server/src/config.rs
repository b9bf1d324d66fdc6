use shared_types::{AppConfig, FeatureFlags, ListingSettings};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse {CONFIG_PATH}: {e}; using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` into the global `OnceLock`. Only the first call has
/// effect. A missing or unparseable file leaves every flag off.
pub fn load_config() {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, "Loaded {CONFIG_PATH}");
            config
        }
        Err(e) => {
            tracing::warn!("{CONFIG_PATH} not found ({e}); optional features disabled");
            AppConfig::default()
        }
    });
}

/// Loaded feature flags, or all-off when `load_config()` has not run.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        s3: false,
        telemetry: false,
    };
    CONFIG.get().map(|c| &c.features).unwrap_or(&DEFAULT)
}

/// Copy shown on the listing form.
pub fn listing_settings() -> ListingSettings {
    CONFIG
        .get()
        .map(|c| c.listing.clone())
        .unwrap_or_default()
}

/// Per-file upload limit, overridable with `MAX_UPLOAD_BYTES`.
pub fn max_upload_bytes() -> u64 {
    std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(shared_types::MAX_UPLOAD_BYTES)
}
