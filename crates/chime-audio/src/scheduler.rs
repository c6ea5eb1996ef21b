/// Expands a profile's pattern into timed tone emissions.
use std::future::IntoFuture;

use futures::FutureExt;
use futures::future::{JoinAll, Map, join_all};
use tracing::debug;

use crate::output::{AudioOutput, ToneHandle};
use crate::profile::SoundProfile;

/// Completion of a whole cue. Awaiting it resolves once every tone of the
/// cue has finished; dropping it leaves the tones playing.
#[derive(Debug, Default)]
pub struct CueHandle {
    tones: Vec<ToneHandle>,
}

impl CueHandle {
    /// Handle with no tones, already resolved.
    pub fn completed() -> Self {
        Self::default()
    }

    /// Number of tones that were scheduled.
    pub fn tone_count(&self) -> usize {
        self.tones.len()
    }

    pub fn is_finished(&self) -> bool {
        self.tones.iter().all(ToneHandle::is_finished)
    }

    /// Fold another cue's tones into this one.
    pub fn merge(mut self, other: CueHandle) -> Self {
        self.tones.extend(other.tones);
        self
    }
}

fn discard(_: Vec<()>) {}

impl IntoFuture for CueHandle {
    type Output = ();
    type IntoFuture = Map<JoinAll<ToneHandle>, fn(Vec<()>)>;

    fn into_future(self) -> Self::IntoFuture {
        join_all(self.tones).map(discard as fn(Vec<()>))
    }
}

/// Turns profiles into tone requests on an [`AudioOutput`].
pub struct PlaybackScheduler {
    output: AudioOutput,
}

impl PlaybackScheduler {
    pub fn new(output: AudioOutput) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &AudioOutput {
        &self.output
    }

    /// Schedule every tone of `profile`, starting now.
    pub fn schedule(&self, profile: &SoundProfile) -> CueHandle {
        self.schedule_at(profile, 0.0)
    }

    /// Schedule every tone of `profile`, with the cue starting `base_offset`
    /// seconds from now. Tones are issued in pattern order.
    pub fn schedule_at(&self, profile: &SoundProfile, base_offset: f64) -> CueHandle {
        let tone = profile.tone();
        debug!(
            frequency = tone.frequency,
            tones = profile.tone_count(),
            base_offset,
            "Scheduling cue"
        );
        let tones = profile
            .pattern
            .iter()
            .map(|offset| self.output.emit_tone(tone, base_offset + offset))
            .collect();
        CueHandle { tones }
    }
}
