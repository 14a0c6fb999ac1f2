//! The synchronous recomputation core: device snapshots in, decisions out.
//!
//! Everything happens on the task that receives the snapshot — choosing the
//! primary device and stepping the warning machine are pure in-memory
//! computations, so one `on_devices_changed` call is one complete update
//! cycle.

use power_core::{choose_primary, Device, Message, WarningTracker};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Owns the current device snapshot, the primary-device choice and the
/// warning state machine.
///
/// Nothing is retained across cycles except the warning machine's scalars
/// and the snapshot itself; the primary device and the synthetic aggregate
/// are recomputed wholesale every time.
#[derive(Debug, Default)]
pub struct PowerService {
    devices: Vec<Device>,
    primary: Option<Device>,
    tracker: WarningTracker,
}

impl PowerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The devices from the most recent snapshot.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// The device currently considered primary.
    pub fn primary(&self) -> Option<&Device> {
        self.primary.as_ref()
    }

    /// Take a fresh device snapshot, recompute the primary device, step the
    /// warning machine, and report everything that changed.
    pub fn on_devices_changed(&mut self, devices: Vec<Device>) -> Vec<Message> {
        self.devices = devices;

        let primary = choose_primary(&self.devices);
        let primary_changed = primary != self.primary;
        self.primary = primary;

        let mut out = vec![Message::DevicesChanged(self.devices.clone())];

        if primary_changed {
            match &self.primary {
                Some(primary) => debug!(
                    state = primary.state.as_str(),
                    percentage = primary.percentage,
                    "primary device changed"
                ),
                None => debug!("no primary device"),
            }
            out.push(Message::PrimaryChanged(self.primary.clone()));
        }

        let update = self.tracker.on_primary_changed(self.primary.as_ref());
        if update.level_changed || update.warning_changed {
            out.push(Message::BatteryStatus {
                level: update.level,
                is_warning: update.is_warning,
            });
        }
        if let Some(level) = update.notify {
            info!(level = level.as_str(), "battery warning");
            out.push(Message::Notify(level));
        }

        out
    }
}

/// Adapt [`PowerService`] to the channel world: spawn a task that consumes
/// device snapshots and forwards the resulting messages.
///
/// The task stops when the snapshot sender or all message receivers go away.
pub fn spawn_service(mut snapshots: mpsc::Receiver<Vec<Device>>) -> mpsc::Receiver<Message> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut service = PowerService::new();
        while let Some(devices) = snapshots.recv().await {
            for message in service.on_devices_changed(devices) {
                if tx.send(message).await.is_err() {
                    return; // all receivers dropped
                }
            }
        }
    });

    rx
}
