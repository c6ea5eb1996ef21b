/// Notification sound facade used by the UI.
///
/// One instance is built at startup and shared by reference; it owns the
/// enable toggle and the audio output.
use std::sync::atomic::{AtomicBool, Ordering};

use chime_config::EngineConfig;
use tokio::runtime::Handle;
use tracing::debug;

use crate::category::SoundCategory;
use crate::output::{AudioOutput, DeviceProbe};
use crate::profile::Registry;
use crate::scheduler::{CueHandle, PlaybackScheduler};

/// Default silence between cues in [`NotificationService::play_all`].
pub const DEFAULT_TEST_GAP_SECS: f64 = 0.25;

pub struct NotificationService {
    enabled: AtomicBool,
    scheduler: PlaybackScheduler,
    test_gap: f64,
}

impl NotificationService {
    pub fn new(output: AudioOutput) -> Self {
        debug_assert!(
            Registry::validate().is_ok(),
            "sound profile registry is inconsistent"
        );
        Self {
            enabled: AtomicBool::new(true),
            scheduler: PlaybackScheduler::new(output),
            test_gap: DEFAULT_TEST_GAP_SECS,
        }
    }

    /// Build from engine config. Acquires the device immediately when
    /// `eager_device` is set.
    pub fn from_config(config: &EngineConfig, probe: DeviceProbe, runtime: Handle) -> Self {
        let output = AudioOutput::new(probe, runtime).with_master_volume(config.master_volume);
        let mut service = Self::new(output);
        service.set_enabled(config.enabled);
        service.test_gap = config.test_gap_ms as f64 / 1000.0;
        if config.eager_device {
            service.warm_up();
        }
        service
    }

    /// Turn future cues on or off. Tones already scheduled still play.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Acquire the audio device now instead of on the first cue.
    pub fn warm_up(&self) -> bool {
        self.scheduler.output().warm_up()
    }

    /// Play the cue for `category`.
    ///
    /// Never fails: when sound is disabled or no device is available the
    /// returned handle is already resolved and nothing is emitted.
    pub fn play(&self, category: SoundCategory) -> CueHandle {
        self.play_at(category, 0.0)
    }

    /// Play every category once, back to back in settings order.
    pub fn play_all(&self) -> CueHandle {
        let mut start = 0.0;
        let mut cue = CueHandle::completed();
        for category in SoundCategory::SETTINGS_ORDER {
            cue = cue.merge(self.play_at(category, start));
            start += Registry::profile(category).cue_length() + self.test_gap;
        }
        cue
    }

    /// Human-readable cue name for UI labels.
    pub fn sound_name(&self, category: SoundCategory) -> &'static str {
        Registry::display_name(category)
    }

    fn play_at(&self, category: SoundCategory, start: f64) -> CueHandle {
        if !self.is_enabled() {
            debug!(%category, "Sound disabled, skipping cue");
            return CueHandle::completed();
        }
        if !self.scheduler.output().warm_up() {
            return CueHandle::completed();
        }
        self.scheduler.schedule_at(Registry::profile(category), start)
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::recording::RecordingSink;

    fn recording_service() -> (NotificationService, crate::recording::Recorder) {
        let (probe, recorder) = RecordingSink::probe();
        let service = NotificationService::new(AudioOutput::new(probe, Handle::current()));
        (service, recorder)
    }

    #[tokio::test(start_paused = true)]
    async fn enabled_by_default() {
        let (service, _) = recording_service();
        assert!(service.is_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_play_emits_nothing() {
        let (service, recorder) = recording_service();
        service.set_enabled(false);
        for category in SoundCategory::ALL {
            let cue = service.play(category);
            assert!(cue.is_finished());
            assert_eq!(cue.tone_count(), 0);
            cue.await;
        }
        assert!(recorder.emissions().is_empty());
        assert_eq!(recorder.probe_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn enabled_play_emits_pattern() {
        let (service, recorder) = recording_service();
        service.set_enabled(true);
        service.play(SoundCategory::Games).await;
        let profile = Registry::profile(SoundCategory::Games);
        let emissions = recorder.emissions();
        assert_eq!(emissions.len(), profile.tone_count());
        assert!(emissions.iter().all(|e| e.tone == profile.tone()));
    }

    #[tokio::test(start_paused = true)]
    async fn enable_twice_is_idempotent() {
        let (service, recorder) = recording_service();
        service.set_enabled(true);
        service.set_enabled(true);
        assert!(service.is_enabled());
        service.play(SoundCategory::Work).await;
        service.play(SoundCategory::Work).await;
        assert_eq!(recorder.probe_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn disabling_mid_cue_does_not_cancel() {
        let (service, recorder) = recording_service();
        let cue = service.play(SoundCategory::Urgent);
        service.set_enabled(false);
        cue.await;
        assert_eq!(recorder.emissions().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn play_all_runs_in_settings_order() {
        let (service, recorder) = recording_service();
        let start = Instant::now();
        let cue = service.play_all();
        assert_eq!(cue.tone_count(), 13);
        cue.await;

        // urgent 0.9 + gap, work 0.25 + gap, family 0.55 + gap, games 0.5
        let expected = 0.9 + 0.25 + 0.55 + 0.5 + 3.0 * DEFAULT_TEST_GAP_SECS;
        let elapsed = start.elapsed().as_secs_f64();
        assert!((elapsed - expected).abs() < 0.01, "{elapsed}");

        let frequencies: Vec<f64> = recorder
            .emissions()
            .iter()
            .map(|e| e.tone.frequency)
            .collect();
        assert_eq!(frequencies[0], 880.0);
        assert_eq!(frequencies[4], 659.25);
        assert_eq!(frequencies[6], 523.25);
        assert_eq!(frequencies[12], 783.99);
    }

    #[tokio::test(start_paused = true)]
    async fn from_config_applies_settings() {
        let (probe, recorder) = RecordingSink::probe();
        let config = EngineConfig {
            enabled: false,
            master_volume: 0.5,
            eager_device: true,
            test_gap_ms: 0,
            ..Default::default()
        };
        let service = NotificationService::from_config(&config, probe, Handle::current());
        assert!(!service.is_enabled());
        assert_eq!(recorder.probe_count(), 1);

        service.set_enabled(true);
        service.play(SoundCategory::Family).await;
        let emissions = recorder.emissions();
        assert!((emissions[0].tone.volume - 0.15).abs() < 1e-9);
        assert_eq!(recorder.probe_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sound_names() {
        let (service, _) = recording_service();
        assert_eq!(service.sound_name(SoundCategory::Family), "🎵 Мягкий колокольчик");
        assert_eq!(service.sound_name(SoundCategory::Urgent), "⚡ Срочный тревожный");
        assert_eq!(service.sound_name(SoundCategory::Games), "🎮 Игровой бип");
    }
}
