// Built-in configuration: TOML compiled into the binary, parsed and validated at startup.

use crate::display::MAX_FONT_PX;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const BUILTIN_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub font: FontConfig,
    pub timing: TimingConfig,
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub bus: u8,
    pub address: u8,
}

impl DisplayConfig {
    pub fn device_path(&self) -> String {
        format!("/dev/i2c-{}", self.bus)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    /// Scalable font file. Unset or unloadable falls back to the built-in bitmap font.
    #[serde(default)]
    pub path: Option<PathBuf>,
    pub size_px: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    pub update_interval_ms: u64,
    /// Disk/IP swap period; independent of update_interval_ms.
    pub rotation_interval_ms: u64,
}

impl TimingConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub temperature_path: PathBuf,
    pub primary_interface: String,
    pub fallback_interface: String,
    #[serde(default = "default_disk_mount")]
    pub disk_mount: PathBuf,
}

fn default_disk_mount() -> PathBuf {
    PathBuf::from("/")
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_str(BUILTIN_CONFIG)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0x03..=0x77).contains(&self.display.address),
            "display.address must be a 7-bit I2C address (0x03..=0x77), got {:#04x}",
            self.display.address
        );
        anyhow::ensure!(
            (1..=MAX_FONT_PX).contains(&self.font.size_px),
            "font.size_px must be between 1 and {} so four lines fit, got {}",
            MAX_FONT_PX,
            self.font.size_px
        );
        if let Some(path) = &self.font.path {
            anyhow::ensure!(
                !path.as_os_str().is_empty(),
                "font.path must be non-empty when set"
            );
        }
        anyhow::ensure!(
            self.timing.update_interval_ms > 0,
            "timing.update_interval_ms must be > 0, got {}",
            self.timing.update_interval_ms
        );
        anyhow::ensure!(
            self.timing.rotation_interval_ms > 0,
            "timing.rotation_interval_ms must be > 0, got {}",
            self.timing.rotation_interval_ms
        );
        anyhow::ensure!(
            !self.sources.temperature_path.as_os_str().is_empty(),
            "sources.temperature_path must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.primary_interface.is_empty(),
            "sources.primary_interface must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.fallback_interface.is_empty(),
            "sources.fallback_interface must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.disk_mount.as_os_str().is_empty(),
            "sources.disk_mount must be non-empty"
        );
        Ok(())
    }
}
