use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Sample rate used when the config leaves it at 0. Fixed, not queried from
/// the device; kira resamples to the output rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

const MIN_SAMPLE_RATE: u32 = 8_000;
const MAX_SAMPLE_RATE: u32 = 192_000;
const MAX_TEST_GAP_MS: u64 = 2_000;

/// Map 0 to [`DEFAULT_SAMPLE_RATE`] and clamp anything else into the
/// supported range.
pub fn resolve_sample_rate(rate: u32) -> u32 {
    if rate == 0 {
        DEFAULT_SAMPLE_RATE
    } else {
        rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE)
    }
}

/// Notification engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EngineConfig {
    /// Initial state of the enable toggle.
    pub enabled: bool,
    /// Synthesis sample rate in Hz (0 = 48 kHz default).
    pub sample_rate: u32,
    /// Output channel count (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Multiplied into every tone volume (0.0 - 1.0).
    pub master_volume: f64,
    /// Acquire the audio device at startup instead of on the first cue.
    pub eager_device: bool,
    /// Silence between cues when every category is played back to back.
    pub test_gap_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_rate: 0,
            channels: 2,
            master_volume: 1.0,
            eager_device: false,
            test_gap_ms: 250,
        }
    }
}

impl EngineConfig {
    pub fn validate(&mut self) {
        if self.sample_rate != 0 {
            self.sample_rate = self.sample_rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE);
        }
        self.channels = self.channels.clamp(1, 2);
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.test_gap_ms = self.test_gap_ms.min(MAX_TEST_GAP_MS);
    }

    /// Sample rate to synthesize at, resolving 0 to the default.
    pub fn effective_sample_rate(&self) -> u32 {
        resolve_sample_rate(self.sample_rate)
    }

    /// Read config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: EngineConfig = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate();
        Ok(config)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
