/// Offline cue renderer.
///
/// Mixes every tone of a cue into one PCM buffer, for previewing cues
/// without an audio device.
use std::path::Path;

use anyhow::{Context, Result};
use chime_config::resolve_sample_rate;
use tracing::info;

use crate::pcm::Pcm;
use crate::profile::SoundProfile;

pub struct CueRenderer {
    sample_rate: u32,
    channels: u16,
}

impl CueRenderer {
    /// A rate of 0 renders at the 48 kHz default; other rates are clamped
    /// like the engine config.
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate: resolve_sample_rate(sample_rate),
            channels: channels.clamp(1, 2),
        }
    }

    /// Render a whole cue, tone starts rounded to the nearest frame.
    pub fn render(&self, profile: &SoundProfile) -> Pcm {
        let rate = self.sample_rate as f64;
        let total_frames = (profile.cue_length() * rate).round() as usize;
        let mut mix = Pcm::silence(total_frames, self.channels, self.sample_rate);

        let tone = profile.tone().render(self.sample_rate, self.channels);
        for offset in profile.pattern {
            let start_frame = (offset * rate).round() as usize;
            mix.mix_at(&tone, start_frame);
        }
        mix.clamp();
        mix
    }
}

impl Default for CueRenderer {
    fn default() -> Self {
        Self::new(48_000, 2)
    }
}

/// Convert f32 samples to i16.
pub fn f32_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let clamped = s.clamp(-1.0, 1.0);
            (clamped * 32767.0) as i16
        })
        .collect()
}

/// Write PCM as a 16-bit WAV file.
pub fn write_wav(pcm: &Pcm, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: pcm.channels,
        sample_rate: pcm.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    for sample in f32_to_i16(&pcm.samples) {
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;
    info!(path = %path.display(), frames = pcm.num_frames(), "Wrote cue");
    Ok(())
}
