/// Shared audio output: lazy device acquisition and timed tone emission.
///
/// The device is opened through a [`DeviceProbe`] the first time a tone is
/// emitted (or on [`AudioOutput::warm_up`]) and kept for the lifetime of the
/// output. A failed probe is remembered; the output then stays silent.
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll, ready};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::NotifyError;
use crate::tone::{ToneSpec, secs_to_duration};

/// Backend that can sound a single tone right now.
/// Implementations: KiraToneSink (device feature), RecordingSink (testing).
pub trait ToneSink: Send {
    /// Resume the device if the platform suspended it.
    fn ensure_running(&mut self) -> Result<(), NotifyError>;

    /// Start playing `tone` immediately.
    fn play_tone(&mut self, tone: &ToneSpec) -> Result<(), NotifyError>;
}

/// Opens the audio device, or reports why it can't.
pub type DeviceProbe = Box<dyn Fn() -> Result<Box<dyn ToneSink>, NotifyError> + Send + Sync>;

type SharedSink = Arc<Mutex<Box<dyn ToneSink>>>;

/// Probe for environments without audio output.
pub fn unavailable(reason: impl Into<String>) -> DeviceProbe {
    let reason = reason.into();
    Box::new(move || Err(NotifyError::EnvironmentUnsupported(reason.clone())))
}

/// Probe for the platform's default output device.
#[cfg(feature = "device")]
pub fn default_device(sample_rate: u32, channels: u16) -> DeviceProbe {
    Box::new(move || {
        let sink = crate::kira_sink::KiraToneSink::new(sample_rate, channels)?;
        Ok(Box::new(sink) as Box<dyn ToneSink>)
    })
}

/// Probe for the platform's default output device.
#[cfg(not(feature = "device"))]
pub fn default_device(_sample_rate: u32, _channels: u16) -> DeviceProbe {
    unavailable("built without the `device` feature")
}

/// Completion of one scheduled tone. Resolves when the tone has finished.
///
/// Dropping the handle does not cancel the tone.
#[derive(Debug)]
pub struct ToneHandle {
    task: Option<JoinHandle<()>>,
}

impl ToneHandle {
    /// Handle that is already resolved.
    pub fn completed() -> Self {
        Self { task: None }
    }

    fn pending(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Future for ToneHandle {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(task) = this.task.as_mut() else {
            return Poll::Ready(());
        };
        if let Err(e) = ready!(Pin::new(task).poll(cx)) {
            warn!("Tone task ended abnormally: {e}");
        }
        this.task = None;
        Poll::Ready(())
    }
}

/// Owner of the process-wide audio device.
pub struct AudioOutput {
    probe: DeviceProbe,
    sink: OnceLock<Option<SharedSink>>,
    runtime: Handle,
    master_volume: f64,
}

impl AudioOutput {
    /// Tone tasks are spawned on `runtime`.
    pub fn new(probe: DeviceProbe, runtime: Handle) -> Self {
        Self {
            probe,
            sink: OnceLock::new(),
            runtime,
            master_volume: 1.0,
        }
    }

    /// Gain multiplied into every emitted tone.
    pub fn with_master_volume(mut self, master_volume: f64) -> Self {
        self.master_volume = master_volume.clamp(0.0, 1.0);
        self
    }

    /// Acquire the device if not yet probed. Returns whether it is usable.
    pub fn warm_up(&self) -> bool {
        self.sink().is_some()
    }

    fn sink(&self) -> Option<&SharedSink> {
        self.sink
            .get_or_init(|| match (self.probe)() {
                Ok(sink) => {
                    info!("Audio output acquired");
                    Some(Arc::new(Mutex::new(sink)))
                }
                Err(e) => {
                    warn!("{e}; notification sounds are muted");
                    None
                }
            })
            .as_ref()
    }

    /// Schedule one tone to start `start_offset` seconds from now.
    ///
    /// Without a device this emits nothing and returns a completed handle.
    pub fn emit_tone(&self, tone: ToneSpec, start_offset: f64) -> ToneHandle {
        let Some(sink) = self.sink() else {
            return ToneHandle::completed();
        };
        let sink = Arc::clone(sink);
        let tone = tone.scaled(self.master_volume);
        let delay = secs_to_duration(start_offset);
        let length = tone.length();

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut sink = sink.lock();
                if let Err(e) = emit(sink.as_mut(), &tone) {
                    warn!(frequency = tone.frequency, "{e}");
                } else {
                    debug!(frequency = tone.frequency, duration = tone.duration, "Tone started");
                }
            }
            tokio::time::sleep(length).await;
        });
        ToneHandle::pending(task)
    }
}

fn emit(sink: &mut dyn ToneSink, tone: &ToneSpec) -> Result<(), NotifyError> {
    sink.ensure_running()?;
    sink.play_tone(tone)
}
