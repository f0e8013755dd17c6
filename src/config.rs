use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory holding `states/`, `continents/`, `countries/`, ...
    #[serde(default = "default_data_root")]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
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

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.data.root, PathBuf::from("data"));
        assert_eq!(config.server.listen, "0.0.0.0:3000");
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            [data]
            root = "/srv/locus/data"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.root, PathBuf::from("/srv/locus/data"));
        assert_eq!(config.server.listen, "0.0.0.0:3000");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load_from_file("/nonexistent/locus.toml").is_err());
    }
}
