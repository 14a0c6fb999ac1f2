//! Desktop notification delivery over `org.freedesktop.Notifications`.
//!
//! This is the user-facing collaborator of the warning machine: it maps a
//! power level to a bubble with an urgency and a sound hint. Failures are
//! reported to the caller, never fatal — the indicator keeps running without
//! a notification daemon.

use power_core::display::format_time_remaining;
use power_core::{Device, PowerError, PowerLevel, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use zbus::zvariant::Value;
use zbus::{proxy, Connection};

const APP_NAME: &str = "power-indicator";

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// The sound asset to play for a level, relative to the configured sounds
/// directory. Every warning level shares the one low-battery sound.
pub fn sound_file(level: PowerLevel) -> Option<&'static str> {
    match level {
        PowerLevel::Ok => None,
        PowerLevel::Low | PowerLevel::VeryLow | PowerLevel::Critical => Some("battery-low.oga"),
    }
}

/// Urgency hint per the notification spec: 0 low, 1 normal, 2 critical.
fn urgency(level: PowerLevel) -> u8 {
    match level {
        PowerLevel::Critical => 2,
        _ => 1,
    }
}

fn summary(level: PowerLevel) -> &'static str {
    match level {
        PowerLevel::Critical => "Battery critically low",
        _ => "Battery low",
    }
}

fn body_text(device: &Device) -> String {
    let time = format_time_remaining(device.time_remaining);
    if time.is_empty() {
        format!("{:.0}% of battery power remaining", device.percentage)
    } else {
        format!(
            "{:.0}% of battery power remaining ({time} left)",
            device.percentage
        )
    }
}

/// Sends low-battery bubbles to the session notification daemon.
pub struct DesktopNotifier {
    proxy: NotificationsProxy<'static>,
    sounds_dir: PathBuf,
    timeout_ms: i32,
    replaces_id: u32,
}

impl DesktopNotifier {
    /// Connect to the session bus and the notification service.
    pub async fn connect(sounds_dir: impl Into<PathBuf>, timeout_ms: i32) -> Result<Self> {
        let connection = Connection::session()
            .await
            .map_err(|e| PowerError::Notify(format!("cannot connect to session bus: {e}")))?;
        let proxy = NotificationsProxy::new(&connection)
            .await
            .map_err(|e| PowerError::Notify(format!("cannot reach notification daemon: {e}")))?;

        Ok(Self {
            proxy,
            sounds_dir: sounds_dir.into(),
            timeout_ms,
            replaces_id: 0,
        })
    }

    /// Show (or update) the low-battery bubble for `level`.
    ///
    /// Escalating warnings replace the previous bubble instead of stacking
    /// a new one on top of it.
    pub async fn show(&mut self, level: PowerLevel, primary: Option<&Device>) -> Result<()> {
        let body = primary.map(body_text).unwrap_or_default();

        let urgency_value = Value::from(urgency(level));
        let sound_value = sound_file(level)
            .map(|name| Value::from(self.sounds_dir.join(name).to_string_lossy().into_owned()));

        let mut hints: HashMap<&str, &Value<'_>> = HashMap::new();
        hints.insert("urgency", &urgency_value);
        if let Some(sound) = &sound_value {
            hints.insert("sound-file", sound);
        }

        let id = self
            .proxy
            .notify(
                APP_NAME,
                self.replaces_id,
                "battery-caution",
                summary(level),
                &body,
                &[],
                hints,
                self.timeout_ms,
            )
            .await
            .map_err(|e| PowerError::Notify(format!("Notify call failed: {e}")))?;

        self.replaces_id = id;
        Ok(())
    }
}
