/// Enveloped sine tone synthesis.
use std::f64::consts::TAU;
use std::time::Duration;

use crate::pcm::Pcm;

/// Length of the linear fade-in at the start of every tone.
pub const ATTACK_SECS: f64 = 0.01;

/// One sine tone: pitch, length and peak gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency: f64,
    pub duration: f64,
    pub volume: f64,
}

impl ToneSpec {
    pub fn new(frequency: f64, duration: f64, volume: f64) -> Self {
        Self {
            frequency,
            duration,
            volume,
        }
    }

    /// Same tone with its peak gain multiplied by `gain`.
    pub fn scaled(self, gain: f64) -> Self {
        Self {
            volume: (self.volume * gain).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Fade-in length. Tones shorter than two attack windows split evenly
    /// between rise and fall so the peak is always reached.
    pub fn attack(&self) -> f64 {
        ATTACK_SECS.min(self.duration / 2.0)
    }

    /// Envelope gain `t` seconds after the tone starts.
    ///
    /// Rises linearly from 0 to `volume` over the attack window, then falls
    /// linearly back to 0 at `duration`.
    pub fn gain_at(&self, t: f64) -> f64 {
        if !(t >= 0.0 && t < self.duration) {
            return 0.0;
        }
        let attack = self.attack();
        if t < attack {
            self.volume * t / attack
        } else {
            self.volume * (self.duration - t) / (self.duration - attack)
        }
    }

    /// Number of frames the tone occupies at `sample_rate`.
    pub fn frame_count(&self, sample_rate: u32) -> usize {
        (self.duration.max(0.0) * sample_rate as f64).round() as usize
    }

    pub fn length(&self) -> Duration {
        secs_to_duration(self.duration)
    }

    /// Render the tone to interleaved PCM, the same sample in every channel.
    pub fn render(&self, sample_rate: u32, channels: u16) -> Pcm {
        let channels = channels.max(1);
        let frames = self.frame_count(sample_rate);
        let rate = sample_rate as f64;
        let step = TAU * self.frequency / rate;

        let mut samples = Vec::with_capacity(frames * channels as usize);
        for i in 0..frames {
            let t = i as f64 / rate;
            let value = ((step * i as f64).sin() * self.gain_at(t)) as f32;
            samples.extend(std::iter::repeat_n(value, channels as usize));
        }
        Pcm::new(samples, channels, sample_rate)
    }
}

/// Seconds to `Duration`, rounded to whole microseconds. Negative or
/// non-finite input maps to zero.
pub fn secs_to_duration(secs: f64) -> Duration {
    if !(secs.is_finite() && secs > 0.0) {
        return Duration::ZERO;
    }
    Duration::from_micros((secs * 1_000_000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn beep() -> ToneSpec {
        ToneSpec::new(440.0, 0.15, 0.3)
    }

    #[test]
    fn envelope_corners() {
        let t = beep();
        assert_eq!(t.gain_at(0.0), 0.0);
        assert!((t.gain_at(0.005) - 0.15).abs() < 1e-9);
        assert!((t.gain_at(ATTACK_SECS) - 0.3).abs() < 1e-9);
        assert!((t.gain_at(0.08) - 0.15).abs() < 1e-9);
        assert_eq!(t.gain_at(0.15), 0.0);
        assert_eq!(t.gain_at(-0.01), 0.0);
        assert_eq!(t.gain_at(1.0), 0.0);
    }

    #[test]
    fn short_tone_splits_attack() {
        let t = ToneSpec::new(440.0, 0.01, 1.0);
        assert!((t.attack() - 0.005).abs() < 1e-12);
        assert!((t.gain_at(0.005) - 1.0).abs() < 1e-9);
        assert!((t.gain_at(0.0075) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn scaled_clamps() {
        let t = beep().scaled(0.5);
        assert!((t.volume - 0.15).abs() < 1e-12);
        assert!((beep().scaled(10.0).volume - 1.0).abs() < 1e-12);
        assert_eq!(t.frequency, 440.0);
    }

    #[test]
    fn render_length_and_channels() {
        let pcm = beep().render(48_000, 2);
        assert_eq!(pcm.channels, 2);
        assert_eq!(pcm.sample_rate, 48_000);
        assert_eq!(pcm.num_frames(), 7_200);
        assert_eq!(pcm.samples[0], 0.0);
        for frame in pcm.samples.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn render_zero_channels_falls_back_to_mono() {
        let pcm = beep().render(8_000, 0);
        assert_eq!(pcm.channels, 1);
        assert_eq!(pcm.num_frames(), 1_200);
    }

    #[test]
    fn render_peak_reaches_volume() {
        let pcm = ToneSpec::new(1_000.0, 0.1, 0.5).render(48_000, 1);
        let peak = pcm.peak();
        assert!(peak <= 0.5 + 1e-6);
        assert!(peak > 0.45);
    }

    #[test]
    fn secs_to_duration_rounds_to_micros() {
        assert_eq!(secs_to_duration(0.15), Duration::from_millis(150));
        assert_eq!(secs_to_duration(0.4), Duration::from_millis(400));
        assert_eq!(secs_to_duration(0.0), Duration::ZERO);
        assert_eq!(secs_to_duration(-1.0), Duration::ZERO);
        assert_eq!(secs_to_duration(f64::NAN), Duration::ZERO);
    }

    proptest! {
        #[test]
        fn gain_stays_within_volume(
            duration in 0.001f64..2.0,
            volume in 0.0f64..=1.0,
            t in -0.5f64..2.5,
        ) {
            let tone = ToneSpec::new(440.0, duration, volume);
            let g = tone.gain_at(t);
            prop_assert!(g >= 0.0);
            prop_assert!(g <= volume + 1e-12);
        }
    }
}
