/// Output backend that records emissions instead of sounding them.
///
/// Used by tests and by hosts that want to observe cues without a device.
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::NotifyError;
use crate::output::{DeviceProbe, ToneSink};
use crate::tone::ToneSpec;

/// One tone that reached the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub tone: ToneSpec,
    /// Time since the sink was opened.
    pub at: Duration,
}

#[derive(Debug, Default)]
struct State {
    emissions: Vec<Emission>,
    probes: usize,
    resumes: usize,
    suspended: bool,
    fail_next: bool,
}

/// Inspection side of a [`RecordingSink`].
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    state: Arc<Mutex<State>>,
}

impl Recorder {
    pub fn emissions(&self) -> Vec<Emission> {
        self.state.lock().emissions.clone()
    }

    /// How many times the device probe ran.
    pub fn probe_count(&self) -> usize {
        self.state.lock().probes
    }

    /// How many times a suspended device was resumed.
    pub fn resume_count(&self) -> usize {
        self.state.lock().resumes
    }

    /// Simulate the platform suspending the device after inactivity.
    pub fn suspend(&self) {
        self.state.lock().suspended = true;
    }

    pub fn is_suspended(&self) -> bool {
        self.state.lock().suspended
    }

    /// Make the next `play_tone` fail.
    pub fn fail_next_tone(&self) {
        self.state.lock().fail_next = true;
    }
}

pub struct RecordingSink {
    state: Arc<Mutex<State>>,
    opened: Instant,
}

impl RecordingSink {
    /// Probe that opens a recording sink, plus the recorder observing it.
    pub fn probe() -> (DeviceProbe, Recorder) {
        let recorder = Recorder::default();
        let state = Arc::clone(&recorder.state);
        let probe: DeviceProbe = Box::new(move || {
            state.lock().probes += 1;
            let sink = RecordingSink {
                state: Arc::clone(&state),
                opened: Instant::now(),
            };
            Ok(Box::new(sink) as Box<dyn ToneSink>)
        });
        (probe, recorder)
    }

    /// Probe that always reports a missing device.
    pub fn failing_probe() -> (DeviceProbe, Recorder) {
        let recorder = Recorder::default();
        let state = Arc::clone(&recorder.state);
        let probe: DeviceProbe = Box::new(move || {
            state.lock().probes += 1;
            Err(NotifyError::EnvironmentUnsupported(
                "no output device".to_string(),
            ))
        });
        (probe, recorder)
    }
}

impl ToneSink for RecordingSink {
    fn ensure_running(&mut self) -> Result<(), NotifyError> {
        let mut state = self.state.lock();
        if state.suspended {
            state.suspended = false;
            state.resumes += 1;
        }
        Ok(())
    }

    fn play_tone(&mut self, tone: &ToneSpec) -> Result<(), NotifyError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(NotifyError::Playback("sound limit reached".to_string()));
        }
        if state.suspended {
            return Err(NotifyError::Playback("device suspended".to_string()));
        }
        state.emissions.push(Emission {
            tone: *tone,
            at: self.opened.elapsed(),
        });
        Ok(())
    }
}
