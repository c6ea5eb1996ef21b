use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Message category that selects a notification cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    Family,
    Work,
    Games,
    Urgent,
}

impl SoundCategory {
    /// Every category, in declaration order.
    pub const ALL: [SoundCategory; 4] = [
        SoundCategory::Family,
        SoundCategory::Work,
        SoundCategory::Games,
        SoundCategory::Urgent,
    ];

    /// Order used by the sound settings list (most pressing first).
    pub const SETTINGS_ORDER: [SoundCategory; 4] = [
        SoundCategory::Urgent,
        SoundCategory::Work,
        SoundCategory::Family,
        SoundCategory::Games,
    ];

    /// Lowercase identifier, as accepted by `from_str`.
    pub fn id(self) -> &'static str {
        match self {
            SoundCategory::Family => "family",
            SoundCategory::Work => "work",
            SoundCategory::Games => "games",
            SoundCategory::Urgent => "urgent",
        }
    }

    /// Short category label for settings lists.
    pub fn label(self) -> &'static str {
        match self {
            SoundCategory::Family => "Семья",
            SoundCategory::Work => "Работа",
            SoundCategory::Games => "Игры",
            SoundCategory::Urgent => "Срочные",
        }
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SoundCategory {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        SoundCategory::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(name))
            .ok_or_else(|| NotifyError::UnknownCategory(s.to_string()))
    }
}
