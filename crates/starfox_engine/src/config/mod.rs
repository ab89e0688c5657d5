//! Configuration system

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
///
/// Files are read and written as TOML or RON, chosen by extension.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Load configuration from file, falling back to defaults when the file is absent
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        count: u32,
        label: String,
    }

    impl Config for Sample {}

    #[test]
    fn test_unsupported_extension() {
        let result = Sample::load_from_file("settings.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let err = Sample::default().save_to_file(std::env::temp_dir().join("sample.yaml"));
        assert!(matches!(err, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_uses_default() {
        let path = std::env::temp_dir().join("starfox_engine_missing_config.toml");
        let _ = std::fs::remove_file(&path);
        let loaded = Sample::load_or_default(&path).expect("default config");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_toml_and_ron_round_trip() {
        let sample = Sample { count: 8000, label: "stars".to_string() };
        for name in ["starfox_engine_sample.toml", "starfox_engine_sample.ron"] {
            let path = std::env::temp_dir().join(name);
            sample.save_to_file(&path).expect("save");
            let loaded = Sample::load_from_file(&path).expect("load");
            assert_eq!(loaded, sample);
            let _ = std::fs::remove_file(&path);
        }
    }
}
