use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGO_BASE_URL: &str = "https://logo.clearbit.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file path, or ":memory:".
    pub database_path: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Prefix for company logo images; the matched domain is appended.
    pub logo_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: "billdesk.db".into(),
            bind_addr: "127.0.0.1:3000".into(),
            logo_base_url: DEFAULT_LOGO_BASE_URL.into(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing keys fall back to the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!("Loaded config from {path}");
        Ok(config)
    }

    /// Config with an in-memory database for use in tests.
    pub fn default_test() -> Self {
        Self {
            database_path: ":memory:".into(),
            bind_addr: "127.0.0.1:0".into(),
            logo_base_url: DEFAULT_LOGO_BASE_URL.into(),
        }
    }
}
