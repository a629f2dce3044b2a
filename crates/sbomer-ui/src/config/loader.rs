use std::path::Path;

use reqwest::Url;

use crate::config::schema::{DashboardConfig, PAGE_SIZES};
use crate::error::ConfigError;

/// Environment variables that override the backend URL, highest priority first.
const API_URL_VARS: [&str; 2] = ["SBOMER_API_URL", "API_URL"];

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<DashboardConfig, ConfigError> {
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }

    let config: DashboardConfig = serde_yaml::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the effective configuration.
///
/// Reads `path` when given, otherwise the default config file if it exists,
/// then applies environment overrides.
pub fn load_dashboard_config(path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => match DashboardConfig::default_path().filter(|p| p.exists()) {
            Some(default_path) => {
                log::debug!("Loading config from {}", default_path.display());
                load_config(default_path)?
            }
            None => DashboardConfig::default(),
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Applies environment overrides through `lookup`.
pub fn apply_env_overrides<F>(config: &mut DashboardConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let api_url = API_URL_VARS.iter().find_map(|key| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (*key, value))
    });

    if let Some((key, value)) = api_url {
        log::debug!("Using API URL from {}", key);
        config.api_url = value.trim().to_string();
    }
}

fn validate_config(config: &DashboardConfig) -> Result<(), ConfigError> {
    if config.api_url.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "api_url must not be empty".to_string(),
        });
    }

    if let Err(e) = Url::parse(&config.api_url) {
        return Err(ConfigError::Validation {
            message: format!("api_url '{}' is not a valid URL: {}", config.api_url, e),
        });
    }

    if config.connect_timeout_secs == 0 || config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "timeouts must be greater than zero".to_string(),
        });
    }

    if !PAGE_SIZES.contains(&config.default_page_size) {
        return Err(ConfigError::Validation {
            message: format!(
                "default_page_size must be one of {:?}, got {}",
                PAGE_SIZES, config.default_page_size
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
api_url: https://sbomer.example.com
connect_timeout_secs: 5
request_timeout_secs: 60
default_page_size: 20
preferences_path: /tmp/sbomer-prefs.json
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.api_url, "https://sbomer.example.com");
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(
            config.preferences_path.as_deref(),
            Some(Path::new("/tmp/sbomer-prefs.json"))
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = load_config_from_str("api_url: http://sbomer:8080\n").unwrap();
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.default_page_size, 10);
        assert!(config.preferences_path.is_none());

        assert_eq!(load_config_from_str("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_validation_failures() {
        assert!(matches!(
            load_config_from_str("api_url: ''\n"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            load_config_from_str("api_url: not a url\n"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            load_config_from_str("request_timeout_secs: 0\n"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            load_config_from_str("default_page_size: 15\n"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            load_config_from_str("api_url: [unterminated"),
            Err(ConfigError::ParseYaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://file-config:9000").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api_url, "http://file-config:9000");

        let missing = load_config("/nonexistent/sbomer-ui/config.yaml");
        assert!(matches!(missing, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_env_override_priority() {
        let env: HashMap<&str, &str> = [
            ("SBOMER_API_URL", "http://primary:1"),
            ("API_URL", "http://fallback:2"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://primary:1");

        let mut config = DashboardConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == "API_URL").then(|| "http://fallback:2".to_string())
        });
        assert_eq!(config.api_url, "http://fallback:2");
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let mut config = DashboardConfig::default();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.api_url, "http://localhost:8080");
    }

    // Tests that modify environment variables must run serially to avoid race conditions
    #[test]
    #[serial]
    fn test_load_dashboard_config_reads_process_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://from-file:1\ndefault_page_size: 50").unwrap();

        std::env::set_var("SBOMER_API_URL", "http://from-env:2");
        let config = load_dashboard_config(Some(file.path())).unwrap();
        std::env::remove_var("SBOMER_API_URL");

        assert_eq!(config.api_url, "http://from-env:2");
        assert_eq!(config.default_page_size, 50);
    }

    #[test]
    #[serial]
    fn test_load_dashboard_config_rejects_bad_env_url() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://from-file:1").unwrap();

        std::env::set_var("SBOMER_API_URL", "::not-a-url::");
        let result = load_dashboard_config(Some(file.path()));
        std::env::remove_var("SBOMER_API_URL");

        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }
}
