use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::PageLimits;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub uris: UriSettings,
    pub register: RegisterConfig,
    pub dggs: DggsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Exactly one of these must be set once CLI overrides are applied
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DataConfig {
    pub database_url: Option<String>,
    pub csv: Option<PathBuf>,
}

/// Published URI bases for each resource class
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UriSettings {
    pub dataset: String,
    pub place: String,
    pub place_name: String,
    pub gazetteer: String,
}

impl Default for UriSettings {
    fn default() -> Self {
        Self {
            dataset: "http://linked.data.gov.au/dataset/placenames".to_string(),
            place: "http://linked.data.gov.au/dataset/placenames/place/".to_string(),
            place_name: "http://linked.data.gov.au/dataset/placenames/placenames/".to_string(),
            gazetteer: "http://linked.data.gov.au/dataset/placenames/gazetteer/".to_string(),
        }
    }
}

impl UriSettings {
    pub fn place(&self, id: &str) -> String {
        format!("{}{}", self.place, id)
    }

    pub fn place_name(&self, id: &str) -> String {
        format!("{}{}", self.place_name, id)
    }

    pub fn gazetteer(&self, code: &str) -> String {
        format!("{}{}", self.gazetteer, code)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegisterConfig {
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        let limits = PageLimits::default();
        Self {
            default_per_page: limits.default_per_page,
            max_per_page: limits.max_per_page,
        }
    }
}

impl RegisterConfig {
    pub fn limits(&self) -> PageLimits {
        PageLimits {
            default_per_page: self.default_per_page.max(1),
            max_per_page: self.max_per_page.max(1),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DggsConfig {
    pub resolution: usize,
}

impl Default for DggsConfig {
    fn default() -> Self {
        Self { resolution: 9 }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen, "0.0.0.0:3000");
        assert_eq!(config.dggs.resolution, 9);
        assert_eq!(config.register.limits(), PageLimits::default());
        assert_eq!(
            config.uris.place("WA12345"),
            "http://linked.data.gov.au/dataset/placenames/place/WA12345"
        );
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[data]
database_url = "host=db user=reader dbname=placenames"

[register]
max_per_page = 200

[uris]
place = "https://example.org/place/"
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(
            config.data.database_url.as_deref(),
            Some("host=db user=reader dbname=placenames")
        );
        assert!(config.data.csv.is_none());
        assert_eq!(config.register.max_per_page, 200);
        assert_eq!(config.register.default_per_page, 50);
        assert_eq!(config.uris.place("X1"), "https://example.org/place/X1");
        assert_eq!(config.uris.gazetteer, UriSettings::default().gazetteer);
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::load_from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/placenames.example.toml"
        ))
        .unwrap();
        assert!(config.data.database_url.is_some());
        assert_eq!(config.uris, UriSettings::default());
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load_from_file("/nonexistent/placenames.toml").is_err());
    }
}
