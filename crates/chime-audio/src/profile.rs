/// Category → cue configuration registry.
///
/// Profiles are compiled-in statics; nothing here is mutable at runtime.
use crate::category::SoundCategory;
use crate::error::NotifyError;
use crate::tone::ToneSpec;

/// Audio-cue configuration for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundProfile {
    /// Tone pitch in Hz.
    pub frequency: f64,
    /// Length of each tone in seconds.
    pub duration: f64,
    /// Start offset of each tone in seconds, relative to the cue start.
    pub pattern: &'static [f64],
    /// Peak gain (0.0 - 1.0).
    pub volume: f64,
}

impl SoundProfile {
    /// The tone every pattern entry emits.
    pub fn tone(&self) -> ToneSpec {
        ToneSpec::new(self.frequency, self.duration, self.volume)
    }

    pub fn tone_count(&self) -> usize {
        self.pattern.len()
    }

    /// Seconds from the cue start until its last tone has finished.
    pub fn cue_length(&self) -> f64 {
        let last_start = self.pattern.iter().copied().fold(0.0, f64::max);
        last_start + self.duration
    }

    fn check(&self) -> Result<(), String> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(format!("frequency must be > 0, got {}", self.frequency));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(format!("duration must be > 0, got {}", self.duration));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(format!("volume must be within 0..=1, got {}", self.volume));
        }
        if self.pattern.is_empty() {
            return Err("pattern is empty".to_string());
        }
        if let Some(offset) = self
            .pattern
            .iter()
            .find(|o| !(o.is_finite() && **o >= 0.0))
        {
            return Err(format!("pattern offset must be >= 0, got {offset}"));
        }
        Ok(())
    }
}

static FAMILY: SoundProfile = SoundProfile {
    frequency: 523.25,
    duration: 0.15,
    pattern: &[0.0, 0.2, 0.4],
    volume: 0.3,
};

static WORK: SoundProfile = SoundProfile {
    frequency: 659.25,
    duration: 0.1,
    pattern: &[0.0, 0.15],
    volume: 0.4,
};

static GAMES: SoundProfile = SoundProfile {
    frequency: 783.99,
    duration: 0.2,
    pattern: &[0.0, 0.1, 0.2, 0.3],
    volume: 0.35,
};

static URGENT: SoundProfile = SoundProfile {
    frequency: 880.0,
    duration: 0.3,
    pattern: &[0.0, 0.2, 0.4, 0.6],
    volume: 0.5,
};

/// Lookup of profiles and display names per category.
pub struct Registry;

impl Registry {
    pub fn profile(category: SoundCategory) -> &'static SoundProfile {
        match category {
            SoundCategory::Family => &FAMILY,
            SoundCategory::Work => &WORK,
            SoundCategory::Games => &GAMES,
            SoundCategory::Urgent => &URGENT,
        }
    }

    /// Human-readable cue name for UI labels.
    pub fn display_name(category: SoundCategory) -> &'static str {
        match category {
            SoundCategory::Family => "🎵 Мягкий колокольчик",
            SoundCategory::Work => "🔔 Короткий сигнал",
            SoundCategory::Games => "🎮 Игровой бип",
            SoundCategory::Urgent => "⚡ Срочный тревожный",
        }
    }

    /// Look up a profile by category identifier.
    pub fn profile_by_name(name: &str) -> Result<&'static SoundProfile, NotifyError> {
        let category: SoundCategory = name.parse()?;
        Ok(Self::profile(category))
    }

    /// Check every registered profile against the profile invariants.
    pub fn validate() -> Result<(), NotifyError> {
        for category in SoundCategory::ALL {
            Self::profile(category)
                .check()
                .map_err(|reason| NotifyError::InvalidProfile { category, reason })?;
            if Self::display_name(category).is_empty() {
                return Err(NotifyError::InvalidProfile {
                    category,
                    reason: "display name is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Category with the longest cue.
    pub fn longest() -> SoundCategory {
        SoundCategory::ALL
            .into_iter()
            .max_by(|a, b| {
                Self::profile(*a)
                    .cue_length()
                    .total_cmp(&Self::profile(*b).cue_length())
            })
            .unwrap_or(SoundCategory::Urgent)
    }
}
