use crate::device::Device;
use crate::level::PowerLevel;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Device provider task → `DevicesChanged`
/// - Power service        → `PrimaryChanged`, `BatteryStatus`, `Notify`
/// - Config watcher task  → `ConfigReloaded`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Power service ─────────────────────────────────────────────────────────
    /// The device set changed (carries the full new snapshot).
    DevicesChanged(Vec<Device>),
    /// A different device is now primary (`None` = no device at all).
    PrimaryChanged(Option<Device>),
    /// The exported battery properties changed.
    BatteryStatus { level: PowerLevel, is_warning: bool },
    /// A user-visible notification should be shown for this level.
    Notify(PowerLevel),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
