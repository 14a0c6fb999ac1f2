//! The device-provider seam: whatever furnishes power-device snapshots.
//!
//! The indicator never talks to hardware itself; it consumes consistent
//! snapshots of the full device set and recomputes from scratch on each one.

use power_core::{Device, PowerError, Result};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::info;

/// Furnishes the full device set on demand.
pub trait DeviceProvider: Send {
    /// A consistent snapshot of every known device.
    fn devices(&self) -> Vec<Device>;
}

/// Fixed device set — the test double used throughout the test suites and
/// handy for demos.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    devices: Vec<Device>,
}

impl StaticProvider {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

impl DeviceProvider for StaticProvider {
    fn devices(&self) -> Vec<Device> {
        self.devices.clone()
    }
}

/// Parse a replay document: a JSON array of device-set snapshots.
pub fn parse_replay(raw: &str) -> Result<Vec<Vec<Device>>> {
    serde_json::from_str(raw).map_err(|e| PowerError::Provider(format!("bad replay data: {e}")))
}

/// Load a replay file from disk.
pub fn load_replay(path: impl AsRef<Path>) -> Result<Vec<Vec<Device>>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    parse_replay(&raw)
}

/// Spawn a background Tokio task that feeds `snapshots` through the returned
/// channel, one every `interval_ms` milliseconds.
///
/// The task stops after the last snapshot, or earlier when the receiver is
/// dropped.
pub fn spawn_replay(snapshots: Vec<Vec<Device>>, interval_ms: u64) -> mpsc::Receiver<Vec<Device>> {
    let (tx, rx) = mpsc::channel(4);
    let interval = Duration::from_millis(interval_ms);

    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        for snapshot in snapshots {
            ticker.tick().await;
            if tx.send(snapshot).await.is_err() {
                return; // all receivers dropped
            }
        }
        info!("Replay finished");
    });

    rx
}
