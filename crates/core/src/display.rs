//! Presentation helpers: header labels, themed icon names, and the
//! icon-visibility policy. The core algorithms never look at these — they
//! exist for whatever presentation layer sits on top.

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind, DeviceState};
use crate::level::PowerLevel;

/// When the indicator icon should be shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconPolicy {
    /// Show whenever a battery is present.
    #[default]
    Present,
    /// Show only while a battery is charging or discharging.
    Charge,
    /// Never show.
    Never,
}

/// Count batteries and UPSes, and how many of them are actively charging or
/// discharging.
pub fn count_batteries(devices: &[Device]) -> (usize, usize) {
    let mut total = 0;
    let mut in_use = 0;

    for device in devices {
        if matches!(device.kind, DeviceKind::Battery | DeviceKind::Ups) {
            total += 1;
            if matches!(
                device.state,
                DeviceState::Charging | DeviceState::Discharging
            ) {
                in_use += 1;
            }
        }
    }

    (total, in_use)
}

/// Apply the icon-policy setting to the current device set.
pub fn should_be_visible(policy: IconPolicy, devices: &[Device]) -> bool {
    match policy {
        IconPolicy::Never => false,
        IconPolicy::Present => count_batteries(devices).0 > 0,
        IconPolicy::Charge => count_batteries(devices).1 > 0,
    }
}

/// Format a time estimate in seconds as a compact human-readable string:
/// "1h 23m" or "45m". Zero (= no estimate) formats as an empty string;
/// sub-minute estimates round up.
pub fn format_time_remaining(secs: u64) -> String {
    let mins = secs.div_ceil(60);
    if mins == 0 {
        return String::new();
    }
    if mins >= 60 {
        format!("{}h {}m", mins / 60, mins % 60)
    } else {
        format!("{mins}m")
    }
}

/// Header label for the primary device, honouring the show-time and
/// show-percentage settings, e.g. `"⚡ 84% (1h 10m)"`.
pub fn header_label(device: &Device, show_time: bool, show_percentage: bool) -> String {
    let charging = matches!(
        device.state,
        DeviceState::Charging | DeviceState::FullyCharged
    );
    let mut label = battery_glyph(device.percentage, charging).to_string();

    if show_percentage {
        label.push_str(&format!(" {:.0}%", device.percentage));
    }
    if show_time {
        let time = format_time_remaining(device.time_remaining);
        if !time.is_empty() {
            label.push_str(&format!(" ({time})"));
        }
    }

    label
}

fn battery_glyph(percentage: f64, charging: bool) -> &'static str {
    if charging {
        return "⚡";
    }
    match percentage as u32 {
        80..=100 => "█",
        60..=79 => "▊",
        40..=59 => "▌",
        20..=39 => "▎",
        _ => "▏",
    }
}

/// Themed icon name for a device, following the freedesktop battery icon
/// naming scheme (`battery-060-charging-symbolic`, `ac-adapter-symbolic`...).
pub fn icon_name(device: &Device) -> String {
    match device.kind {
        DeviceKind::LinePower => "ac-adapter-symbolic".to_string(),
        DeviceKind::Battery | DeviceKind::Ups => battery_icon_name(device),
        _ => "battery-symbolic".to_string(),
    }
}

fn battery_icon_name(device: &Device) -> String {
    if device.state == DeviceState::FullyCharged {
        return "battery-full-charged-symbolic".to_string();
    }
    if device.state == DeviceState::Discharging
        && PowerLevel::classify(device.percentage) == PowerLevel::Critical
    {
        return "battery-caution-symbolic".to_string();
    }

    // icon themes ship 20%-step variants
    let step = ((device.percentage / 20.0).round() as u32) * 20;
    let suffix = if device.state == DeviceState::Charging {
        "-charging"
    } else {
        ""
    };
    format!("battery-{step:03}{suffix}-symbolic")
}
