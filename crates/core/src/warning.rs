//! The warning state machine: decides when the primary battery's situation
//! is worth flagging and when a fresh notification should fire.

use crate::device::{Device, DeviceState};
use crate::level::PowerLevel;

/// Identity of the battery being tracked: the provider path for a real
/// battery, `None` for the synthetic aggregate.
type BatteryId = Option<String>;

/// Outcome of feeding one primary-device sample to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningUpdate {
    pub level: PowerLevel,
    pub level_changed: bool,
    pub is_warning: bool,
    pub warning_changed: bool,
    /// `Some` when a user-visible notification should fire for this sample.
    pub notify: Option<PowerLevel>,
}

/// Level/warning state machine driven by primary-device samples.
///
/// Holds three scalars across update cycles: the last exported
/// `(level, is_warning)` pair and the most severe level already notified.
/// Everything else is recomputed from the sample at hand, so repeated
/// identical samples are a no-op.
#[derive(Debug, Default)]
pub struct WarningTracker {
    tracked: Option<BatteryId>,
    level: PowerLevel,
    is_warning: bool,
    last_notified: Option<PowerLevel>,
}

impl WarningTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently exported level.
    pub fn level(&self) -> PowerLevel {
        self.level
    }

    /// Whether the tracked battery is discharging at a non-OK level.
    pub fn is_warning(&self) -> bool {
        self.is_warning
    }

    /// Feed the latest primary device (or its absence) through the machine.
    ///
    /// Only battery-kind primaries participate; anything else resets the
    /// tracker to the no-battery state. Switching between batteries, or
    /// between a real battery and the aggregate, re-arms notification
    /// suppression so the new device is judged from scratch against its own
    /// current percentage.
    pub fn on_primary_changed(&mut self, primary: Option<&Device>) -> WarningUpdate {
        let Some(battery) = primary.filter(|d| d.is_battery()) else {
            self.tracked = None;
            self.last_notified = None;
            return self.transition(PowerLevel::Ok, false, None);
        };

        if self.tracked.as_ref() != Some(&battery.path) {
            self.tracked = Some(battery.path.clone());
            self.last_notified = None;
        }

        let level = PowerLevel::classify(battery.percentage);
        let is_warning = battery.state == DeviceState::Discharging && level != PowerLevel::Ok;

        let notify = if is_warning {
            if self.last_notified.map_or(true, |notified| level > notified) {
                self.last_notified = Some(level);
                Some(level)
            } else {
                None
            }
        } else {
            // leaving the warning re-arms suppression: a later re-entry at
            // the same severity notifies again
            self.last_notified = None;
            None
        };

        self.transition(level, is_warning, notify)
    }

    fn transition(
        &mut self,
        level: PowerLevel,
        is_warning: bool,
        notify: Option<PowerLevel>,
    ) -> WarningUpdate {
        let update = WarningUpdate {
            level,
            level_changed: level != self.level,
            is_warning,
            warning_changed: is_warning != self.is_warning,
            notify,
        };
        self.level = level;
        self.is_warning = is_warning;
        update
    }
}
