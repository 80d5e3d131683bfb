use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/serving.yaml";
pub const DEFAULT_MODEL_PATH: &str = "model.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model_path() -> String {
    DEFAULT_MODEL_PATH.to_string()
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_path: default_model_path(),
        }
    }
}

impl ServingConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServingConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolution order: an explicit file named by `SERVING_CONFIG`, then the
    /// default config file when present, then built-in defaults. `MODEL_PATH`
    /// overrides the artifact location in every case.
    pub fn resolve() -> Result<Self> {
        let mut config = match std::env::var("SERVING_CONFIG") {
            Ok(path) => Self::load(path)?,
            Err(_) => {
                if Path::new(DEFAULT_CONFIG_PATH).exists() {
                    Self::load(DEFAULT_CONFIG_PATH)?
                } else {
                    Self::default()
                }
            }
        };
        if let Ok(path) = std::env::var("MODEL_PATH") {
            config.model_path = path;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServingConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_path, "model.json");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ServingConfig = serde_yaml::from_str("port: 9000\n").unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_path, "model.json");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("serving-config-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "host: 127.0.0.1\nport: 9100\nmodel_path: artifacts/model.json\n",
        )
        .unwrap();

        let config = ServingConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9100);
        assert_eq!(config.model_path, "artifacts/model.json");
    }
}
