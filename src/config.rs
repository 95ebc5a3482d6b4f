use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WranglerError};
use crate::pipeline::processing::normalize::EmptySegments;
use crate::pipeline::processing::shape::ShaperOptions;

pub const DEFAULT_CONFIG_PATH: &str = "osm_wrangler.toml";
pub const CONFIG_PATH_ENV: &str = "OSM_WRANGLER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shaper: ShaperConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShaperConfig {
    #[serde(default)]
    pub network_empty_segments: EmptySegments,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
        }
    }
}

impl Config {
    /// Load from an explicit path, `$OSM_WRANGLER_CONFIG`, or
    /// `osm_wrangler.toml` in the working directory. Only the implicit default
    /// file may be missing, in which case built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load_from(Path::new(&path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::load_from(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            WranglerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    pub fn shaper_options(&self) -> ShaperOptions {
        ShaperOptions {
            network_empty_segments: self.shaper.network_empty_segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.shaper.network_empty_segments, EmptySegments::Keep);
        assert!(!config.output.pretty);
        assert_eq!(config.logging.directory, PathBuf::from("logs"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config =
            toml::from_str("[shaper]\nnetwork_empty_segments = \"drop\"\n").unwrap();
        assert_eq!(config.shaper.network_empty_segments, EmptySegments::Drop);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osm_wrangler.toml");
        fs::write(&path, "[output]\npretty = true\n[logging]\ndirectory = \"/tmp/osm\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.logging.directory, PathBuf::from("/tmp/osm"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(WranglerError::Config(_))));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[shaper]\nnetwork_empty_segments = \"sometimes\"\n");
        assert!(result.is_err());
    }
}
