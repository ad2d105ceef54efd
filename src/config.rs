//! Per-install configuration.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/Biodata/config.toml on Windows
//!   $XDG_CONFIG_HOME/biodata/config.toml on Linux
//!   ~/Library/Application Support/Biodata/config.toml on macOS
//!
//! The config is loaded once at startup and handed to consumers by
//! reference; nothing mutates it afterwards.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Where exported documents land. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
    /// Export rendering knobs.
    #[serde(default)]
    pub export: ExportSettings,
}

/// Rendering parameters for the export pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Canvas scale factor applied on top of the 96 dpi A4 canvas.
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,
    /// JPEG quality used when re-encoding the subject photo.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Timeout for fetching the subject photo. The export itself has no
    /// timeout; once the photo stage is resolved it runs to completion.
    #[serde(default = "default_photo_timeout_secs")]
    pub photo_timeout_secs: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            render_scale: default_render_scale(),
            jpeg_quality: default_jpeg_quality(),
            photo_timeout_secs: default_photo_timeout_secs(),
        }
    }
}

impl ExportSettings {
    /// Rejects values the render pipeline cannot work with. A zero or
    /// non-finite scale would make the page geometry degenerate, so it is
    /// refused up front instead of surfacing deep inside an export.
    pub fn validate(&self) -> Result<()> {
        if !self.render_scale.is_finite() || self.render_scale <= 0.0 {
            bail!(
                "export.render_scale must be a positive finite number, got {}",
                self.render_scale
            );
        }
        Ok(())
    }
}

const fn default_jpeg_quality() -> u8 {
    90
}

const fn default_photo_timeout_secs() -> u64 {
    20
}

fn default_render_scale() -> f32 {
    2.0
}

/// Returns the root directory where Biodata stores its config.
///
/// Order of precedence:
/// 1. `BIODATA_HOME` environment variable.
/// 2. OS-specific config directory via `directories::BaseDirs`.
pub fn config_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("BIODATA_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS config directory")?;
    Ok(base_dirs.config_dir().join("Biodata"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        cfg.export
            .validate()
            .with_context(|| format!("Invalid config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_root()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns BIODATA_HOME to keep parallel test runs from racing on
    // the process environment.
    #[test]
    fn defaults_then_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        env::set_var("BIODATA_HOME", tmp.path());
        let cfg = load_or_default().unwrap();
        assert!(cfg.output_dir.is_none());
        assert_eq!(cfg.export.jpeg_quality, 90);

        let mut cfg = AppConfig::default();
        cfg.output_dir = Some(PathBuf::from("/tmp/exports"));
        cfg.export.render_scale = 1.0;
        save(&cfg).unwrap();
        let loaded = load_or_default().unwrap();
        assert_eq!(loaded.output_dir, cfg.output_dir);
        assert_eq!(loaded.export.render_scale, 1.0);

        // Well-formed TOML with an unusable scale is refused at load time.
        fs::write(
            config_file_path().unwrap(),
            "[export]\nrender_scale = 0.0\n",
        )
        .unwrap();
        let err = load_or_default().unwrap_err().to_string();
        assert!(err.contains("Invalid config file"), "{err}");
        env::remove_var("BIODATA_HOME");
    }

    #[test]
    fn render_scale_must_be_positive_and_finite() {
        assert!(ExportSettings::default().validate().is_ok());
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let cfg = ExportSettings {
                render_scale: scale,
                ..ExportSettings::default()
            };
            assert!(cfg.validate().is_err(), "scale {scale} must be rejected");
        }
    }
}
