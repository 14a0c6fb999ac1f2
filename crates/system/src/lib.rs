pub mod provider;
pub mod service;

pub use provider::{load_replay, parse_replay, spawn_replay, DeviceProvider, StaticProvider};
pub use service::{spawn_service, PowerService};
