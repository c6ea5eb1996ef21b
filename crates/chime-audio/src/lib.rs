// Notification sound engine: category profiles, tone synthesis, cue scheduling (tokio)

pub mod category;
pub mod error;
#[cfg(feature = "device")]
pub mod kira_sink;
pub mod output;
pub mod pcm;
pub mod profile;
pub mod recording;
pub mod renderer;
pub mod scheduler;
pub mod service;
pub mod tone;

pub use category::SoundCategory;
pub use error::NotifyError;
pub use output::{AudioOutput, DeviceProbe, ToneHandle, ToneSink};
pub use profile::{Registry, SoundProfile};
pub use scheduler::{CueHandle, PlaybackScheduler};
pub use service::NotificationService;
pub use tone::ToneSpec;
