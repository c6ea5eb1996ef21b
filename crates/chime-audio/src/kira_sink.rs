/// Kira-based tone output for real-time playback.
///
/// Tones are synthesized to PCM and handed to kira as `StaticSoundData`.
use std::sync::Arc;

use kira::dsp::Frame;
use kira::manager::{
    AudioManager, AudioManagerSettings, MainPlaybackState, backend::DefaultBackend,
};
use kira::sound::static_sound::{StaticSoundData, StaticSoundSettings};
use kira::tween::Tween;
use tracing::{debug, info};

use crate::error::NotifyError;
use crate::output::ToneSink;
use crate::pcm::Pcm;
use crate::tone::ToneSpec;

/// Convert interleaved PCM to kira stereo frames.
fn pcm_to_frames(pcm: &Pcm) -> Arc<[Frame]> {
    let channels = pcm.channels.max(1) as usize;
    pcm.samples
        .chunks(channels)
        .map(|frame| match frame {
            [left, right, ..] => Frame::new(*left, *right),
            [mono] => Frame::from_mono(*mono),
            [] => Frame::ZERO,
        })
        .collect()
}

pub struct KiraToneSink {
    manager: AudioManager,
    sample_rate: u32,
    channels: u16,
}

impl KiraToneSink {
    /// Open the default output device.
    pub fn new(sample_rate: u32, channels: u16) -> Result<Self, NotifyError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| {
                NotifyError::EnvironmentUnsupported(format!("Failed to create audio manager: {e}"))
            })?;
        info!(sample_rate, channels, "KiraToneSink: output opened");
        Ok(Self {
            manager,
            sample_rate,
            channels,
        })
    }
}

impl ToneSink for KiraToneSink {
    fn ensure_running(&mut self) -> Result<(), NotifyError> {
        match self.manager.state() {
            MainPlaybackState::Playing => Ok(()),
            MainPlaybackState::Pausing | MainPlaybackState::Paused => {
                debug!("Resuming suspended audio output");
                self.manager
                    .resume(Tween::default())
                    .map_err(|e| NotifyError::Playback(format!("Failed to resume output: {e}")))
            }
        }
    }

    fn play_tone(&mut self, tone: &ToneSpec) -> Result<(), NotifyError> {
        let pcm = tone.render(self.sample_rate, self.channels);
        let data = StaticSoundData {
            sample_rate: pcm.sample_rate,
            frames: pcm_to_frames(&pcm),
            settings: StaticSoundSettings::default(),
        };
        self.manager
            .play(data)
            .map(|_handle| ())
            .map_err(|e| NotifyError::Playback(format!("Failed to play tone: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Opening the device needs audio hardware; only the conversion is tested.

    #[test]
    fn stereo_frames() {
        let pcm = Pcm::new(vec![0.5, -0.5, 0.25, -0.25], 2, 48_000);
        let frames = pcm_to_frames(&pcm);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], Frame::new(0.5, -0.5));
        assert_eq!(frames[1], Frame::new(0.25, -0.25));
    }

    #[test]
    fn mono_frames_are_duplicated() {
        let pcm = Pcm::new(vec![0.5, 0.25], 1, 48_000);
        let frames = pcm_to_frames(&pcm);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1], Frame::from_mono(0.25));
    }
}
