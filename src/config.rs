//! Configuration for the roster extractor.

use serde::{Deserialize, Serialize};

/// Poll budgets for the two bounded waits.
///
/// The roster table is consistently the slowest-rendering region of the page,
/// so it gets a longer budget than single late-rendered elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitSettings {
    /// Budget for locating a single late-rendered element (league name).
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,
    #[serde(default = "default_element_interval_ms")]
    pub element_interval_ms: u64,
    /// Budget for the roster row region.
    #[serde(default = "default_roster_timeout_ms")]
    pub roster_timeout_ms: u64,
    #[serde(default = "default_roster_interval_ms")]
    pub roster_interval_ms: u64,
}

fn default_element_timeout_ms() -> u64 {
    2500
}

fn default_element_interval_ms() -> u64 {
    120
}

fn default_roster_timeout_ms() -> u64 {
    4500
}

fn default_roster_interval_ms() -> u64 {
    150
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            element_timeout_ms: default_element_timeout_ms(),
            element_interval_ms: default_element_interval_ms(),
            roster_timeout_ms: default_roster_timeout_ms(),
            roster_interval_ms: default_roster_interval_ms(),
        }
    }
}

/// Headless browser configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Chrome executable path override; per-OS default used when unset.
    #[serde(default)]
    pub chrome_path: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wait: WaitSettings,
    #[serde(default)]
    pub browser: BrowserSettings,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables. Field names contain
            // underscores, so nesting levels are separated by a double
            // underscore: ROSTER_WAIT__ELEMENT_TIMEOUT_MS, etc.
            .add_source(
                config::Environment::with_prefix("ROSTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
