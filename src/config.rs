//! Application configuration.
//!
//! Defaults cover everything. A page may override any subset by embedding a
//! JSON object in `<script id="app-config" type="application/json">`; the
//! block is read once at startup. A malformed block is logged and ignored so
//! a bad deploy still leaves a working form.

use serde::Deserialize;

use schedule::Theme;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const STORE_NAME_KEY: &str = "storeName";
pub const STORE_NAME_PLACEHOLDER: &str = "@YourStoreName";

/// Element id of the optional JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

pub const DEFAULT_EXPORT_WIDTH: u32 = 1080;
pub const DEFAULT_EXPORT_HEIGHT: u32 = 1920;
pub const DEFAULT_SETTLE_FALLBACK_MS: u32 = 100;
pub const DEFAULT_SETTLE_TIMEOUT_MS: u32 = 1500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Export pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Target raster width in CSS pixels.
    pub width: u32,
    /// Target raster height in CSS pixels.
    pub height: u32,
    /// Fixed settle delay used when the page exposes no font-loading signal.
    pub settle_fallback_ms: u32,
    /// Upper bound on waiting for the font-loading signal.
    pub settle_timeout_ms: u32,
    /// Download name prefix; the date input value and `.png` follow.
    pub file_prefix: String,
    pub idle_label: String,
    pub busy_label: String,
    pub failure_notice: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_EXPORT_WIDTH,
            height: DEFAULT_EXPORT_HEIGHT,
            settle_fallback_ms: DEFAULT_SETTLE_FALLBACK_MS,
            settle_timeout_ms: DEFAULT_SETTLE_TIMEOUT_MS,
            file_prefix: "reservation_".to_owned(),
            idle_label: "画像を保存".to_owned(),
            busy_label: "生成中...".to_owned(),
            failure_notice: "画像の生成に失敗しました。".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// localStorage key of the store name.
    pub storage_key: String,
    /// Brand text shown while the store name is empty.
    pub placeholder: String,
    pub default_theme: Theme,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: STORE_NAME_KEY.to_owned(),
            placeholder: STORE_NAME_PLACEHOLDER.to_owned(),
            default_theme: Theme::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON override. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when [`AppConfig::validate`] rejects a value.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        let export = &self.export;
        if export.width == 0 || export.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "export size must be non-zero, got {}x{}",
                export.width, export.height
            )));
        }
        if export.settle_fallback_ms > export.settle_timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "settle_fallback_ms ({}) exceeds settle_timeout_ms ({})",
                export.settle_fallback_ms, export.settle_timeout_ms
            )));
        }
        Ok(())
    }

    /// Defaults, overridden by the page's config block when present.
    pub fn load() -> Self {
        let Some(raw) = read_config_block() else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("loaded config override from #{CONFIG_ELEMENT_ID}");
                config
            }
            Err(e) => {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
                Self::default()
            }
        }
    }
}

fn read_config_block() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let document = web_sys::window()?.document()?;
        let raw = document.get_element_by_id(CONFIG_ELEMENT_ID)?.text_content()?;
        if raw.trim().is_empty() { None } else { Some(raw) }
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
