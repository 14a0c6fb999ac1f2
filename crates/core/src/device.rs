use serde::{Deserialize, Serialize};

/// What a power device is, in the provider's (UPower) vocabulary.
///
/// A device's kind and `power_supply` flag never change over its lifetime;
/// only `state`, `percentage` and `time_remaining` move as the hardware
/// reports new readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    #[default]
    Unknown,
    LinePower,
    Battery,
    Ups,
    Monitor,
    Mouse,
    Keyboard,
    Pda,
    Phone,
}

impl DeviceKind {
    /// The higher the weight, the more interesting the device when nothing
    /// else distinguishes two candidates for primary.
    pub fn weight(self) -> u8 {
        match self {
            DeviceKind::Battery | DeviceKind::Ups => 2,
            DeviceKind::LinePower => 0,
            _ => 1,
        }
    }
}

/// Charge state as reported by the provider.
///
/// Discriminants follow the UPower enum; the primary-device comparator uses
/// the numeric ordinal as its final tie-break.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum DeviceState {
    #[default]
    Unknown = 0,
    Charging = 1,
    Discharging = 2,
    Empty = 3,
    FullyCharged = 4,
    PendingCharge = 5,
    PendingDischarge = 6,
}

impl DeviceState {
    /// String form used for the exported device-state property and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceState::Unknown => "unknown",
            DeviceState::Charging => "charging",
            DeviceState::Discharging => "discharging",
            DeviceState::Empty => "empty",
            DeviceState::FullyCharged => "fully-charged",
            DeviceState::PendingCharge => "pending-charge",
            DeviceState::PendingDischarge => "pending-discharge",
        }
    }
}

/// A single power device as reported by the device provider.
///
/// `path` is the provider's opaque identity handle (a D-Bus object path in
/// practice). The synthetic aggregate built by the aggregator has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub path: Option<String>,
    pub kind: DeviceKind,
    /// `true` if this device supplies power to the system.
    pub power_supply: bool,
    pub state: DeviceState,
    /// Charge level in `[0, 100]`.
    pub percentage: f64,
    /// Estimated seconds until empty (discharging) or full (charging);
    /// 0 means no estimate.
    pub time_remaining: u64,
}

impl Device {
    /// Build a device from raw provider readings.
    ///
    /// Out-of-range values are fixed up at this ingestion boundary: the
    /// percentage is clamped to `[0, 100]` and a negative time estimate is
    /// treated as unknown.
    pub fn new(
        path: Option<String>,
        kind: DeviceKind,
        power_supply: bool,
        state: DeviceState,
        percentage: f64,
        time_remaining: i64,
    ) -> Self {
        Self {
            path,
            kind,
            power_supply,
            state,
            percentage: percentage.clamp(0.0, 100.0),
            time_remaining: time_remaining.max(0) as u64,
        }
    }

    pub fn is_battery(&self) -> bool {
        self.kind == DeviceKind::Battery
    }
}
