use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Page sizes the table pagination offers.
pub const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the SBOMer backend, without the `/api/v1` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Page size used when the location does not carry one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Where the theme preference is stored. Defaults under the user config dir.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            default_page_size: default_page_size(),
            preferences_path: None,
        }
    }
}

impl DashboardConfig {
    /// Directory holding the dashboard's config and preference files.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sbomer-ui"))
    }

    /// Default location of the YAML config file.
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.yaml"))
    }

    /// Resolved location of the preference file.
    pub fn preferences_file(&self) -> Option<PathBuf> {
        self.preferences_path
            .clone()
            .or_else(|| Self::config_dir().map(|dir| dir.join("preferences.json")))
    }
}
