// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;
use crate::config::AnalyzerConfig;
use crate::domain::errors::*;
use crate::utils::logging::LogLevel;

/// Prefix for environment overrides, e.g. `VIDSIGHT_SCENE_THRESHOLD`
pub const ENV_PREFIX: &str = "VIDSIGHT_";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    vidsight: AnalyzerConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Files searched, in order, when no path is given explicitly
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("vidsight.toml"),
            PathBuf::from("config").join("vidsight.toml"),
        ];
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(config_home).join("vidsight").join("config.toml"));
        } else if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".config").join("vidsight").join("config.toml"));
        }
        paths
    }

    /// Parse a config document; settings live under a `[vidsight]` table
    pub fn parse(toml_content: &str) -> Result<AnalyzerConfig, DomainError> {
        let file: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::BadArgs(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.vidsight)
    }

    /// Load a config file that must exist
    pub fn load_file(path: &Path) -> Result<AnalyzerConfig, DomainError> {
        if !path.exists() {
            return Err(DomainError::FileNotFound(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::BadArgs(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// The explicit path if given, else the first default path that exists
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_paths().into_iter().find(|p| p.is_file()),
        }
    }

    /// Load the located file, or defaults when there is none
    pub fn load(explicit: Option<&Path>) -> Result<AnalyzerConfig, DomainError> {
        match Self::locate(explicit) {
            Some(path) => Self::load_file(&path),
            None => Ok(AnalyzerConfig::default()),
        }
    }

    /// Apply `VIDSIGHT_*` overrides read through `lookup`
    pub fn apply_env<F>(config: &mut AnalyzerConfig, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let mut applied = 0;

        if let Some(v) = var("FFMPEG_PATH") {
            config.tools.ffmpeg_path = v;
            applied += 1;
        }
        if let Some(v) = var("FFPROBE_PATH") {
            config.tools.ffprobe_path = v;
            applied += 1;
        }
        if let Some(v) = var("SCENE_THRESHOLD") {
            config.analysis.scene_threshold = parse_env("SCENE_THRESHOLD", &v)?;
            applied += 1;
        }
        if let Some(v) = var("MOTION_WINDOW_SECS") {
            config.analysis.motion_window_secs = parse_env("MOTION_WINDOW_SECS", &v)?;
            applied += 1;
        }
        if let Some(v) = var("QUALITY_SAMPLES") {
            config.analysis.quality_samples = parse_env("QUALITY_SAMPLES", &v)?;
            applied += 1;
        }
        if let Some(v) = var("ENABLE_FRAME_SAMPLING") {
            config.analysis.enable_frame_sampling = parse_env("ENABLE_FRAME_SAMPLING", &v)?;
            applied += 1;
        }
        if let Some(v) = var("BATCH_CONCURRENCY") {
            config.analysis.batch_concurrency = parse_env("BATCH_CONCURRENCY", &v)?;
            applied += 1;
        }
        if let Some(v) = var("LOG_LEVEL") {
            config.logging.level = LogLevel::parse(&v)?;
            applied += 1;
        }
        if let Some(v) = var("LOG_JSON") {
            config.logging.json = parse_env("LOG_JSON", &v)?;
            applied += 1;
        }

        Ok(applied)
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| {
        DomainError::BadArgs(format!("Invalid value for {}{}: {}", ENV_PREFIX, name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = TomlConfigAdapter::parse(
            r#"
            [vidsight.analysis]
            scene_threshold = 0.45

            [vidsight.tools]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.scene_threshold, 0.45);
        assert_eq!(config.analysis.quality_samples, 3);
        assert_eq!(config.tools.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.tools.ffprobe_path, "ffprobe");
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(TomlConfigAdapter::parse("").unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = TomlConfigAdapter::parse("[vidsight\nlevel = ").unwrap_err();
        assert!(matches!(err, DomainError::BadArgs(_)));
    }

    #[test]
    fn test_load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidsight.toml");
        std::fs::write(&path, "[vidsight.logging]\nlevel = \"debug\"\njson = true\n").unwrap();

        let config = TomlConfigAdapter::load(Some(&path)).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlConfigAdapter::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, DomainError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_log_level_in_file() {
        let err = TomlConfigAdapter::parse("[vidsight.logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, DomainError::BadArgs(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VIDSIGHT_SCENE_THRESHOLD", "0.5"),
            ("VIDSIGHT_ENABLE_FRAME_SAMPLING", "false"),
            ("VIDSIGHT_FFPROBE_PATH", "/usr/local/bin/ffprobe"),
            ("VIDSIGHT_LOG_LEVEL", "Trace"),
            ("UNRELATED", "1"),
        ]
        .into_iter()
        .collect();

        let mut config = AnalyzerConfig::default();
        let applied =
            TomlConfigAdapter::apply_env(&mut config, |k| vars.get(k).map(|v| v.to_string()))
                .unwrap();

        assert_eq!(applied, 4);
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(config.analysis.scene_threshold, 0.5);
        assert!(!config.analysis.enable_frame_sampling);
        assert_eq!(config.tools.ffprobe_path, "/usr/local/bin/ffprobe");
    }

    #[test]
    fn test_env_override_with_bad_number() {
        let mut config = AnalyzerConfig::default();
        let err = TomlConfigAdapter::apply_env(&mut config, |k| {
            (k == "VIDSIGHT_QUALITY_SAMPLES").then(|| "three".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::BadArgs(_)));
    }
}
