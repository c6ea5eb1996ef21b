// Engine configuration (output format, master volume, startup behaviour)

pub mod engine_config;

pub use engine_config::{DEFAULT_SAMPLE_RATE, EngineConfig, resolve_sample_rate};
