/// PCM audio data with interleaved f32 samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Pcm {
    /// Interleaved sample data [L, R, L, R, ...] in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Pcm {
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Silent buffer of `frames` frames.
    pub fn silence(frames: usize, channels: u16, sample_rate: u32) -> Self {
        Self::new(vec![0.0; frames * channels as usize], channels, sample_rate)
    }

    /// Returns the number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Returns the duration in microseconds.
    pub fn duration_us(&self) -> i64 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0;
        }
        self.num_frames() as i64 * 1_000_000 / self.sample_rate as i64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Add `other` into this buffer starting at frame `offset_frames`.
    /// Samples past the end are dropped. Both buffers must share a layout.
    pub fn mix_at(&mut self, other: &Pcm, offset_frames: usize) {
        debug_assert_eq!(self.channels, other.channels);
        let start = offset_frames * self.channels as usize;
        if start >= self.samples.len() {
            return;
        }
        for (dst, &src) in self.samples[start..].iter_mut().zip(&other.samples) {
            *dst += src;
        }
    }

    pub fn clamp(&mut self) {
        for sample in &mut self.samples {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_frames_and_duration() {
        let pcm = Pcm::silence(48_000, 2, 48_000);
        assert_eq!(pcm.samples.len(), 96_000);
        assert_eq!(pcm.num_frames(), 48_000);
        assert_eq!(pcm.duration_us(), 1_000_000);
    }

    #[test]
    fn zero_channels() {
        let pcm = Pcm::new(vec![0.1, 0.2], 0, 44_100);
        assert_eq!(pcm.num_frames(), 0);
        assert_eq!(pcm.duration_us(), 0);
    }

    #[test]
    fn mix_is_additive() {
        let mut buffer = Pcm::new(vec![0.3; 4], 1, 100);
        buffer.mix_at(&Pcm::new(vec![0.5], 1, 100), 0);
        assert!((buffer.samples[0] - 0.8).abs() < 1e-6);
        assert!((buffer.samples[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn mix_at_offset_truncates() {
        let mut buffer = Pcm::silence(3, 2, 100);
        buffer.mix_at(&Pcm::new(vec![0.5, -0.5, 0.25, -0.25], 2, 100), 2);
        assert_eq!(buffer.samples, vec![0.0, 0.0, 0.0, 0.0, 0.5, -0.5]);
        buffer.mix_at(&Pcm::new(vec![1.0, 1.0], 2, 100), 3);
        assert_eq!(buffer.samples[4], 0.5);
    }

    #[test]
    fn clamp_and_peak() {
        let mut pcm = Pcm::new(vec![2.0, -3.0, 0.5], 1, 100);
        assert_eq!(pcm.peak(), 3.0);
        pcm.clamp();
        assert_eq!(pcm.samples, vec![1.0, -1.0, 0.5]);
    }
}
