use power_core::IconPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `power-indicator.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Header / icon display settings.
    pub display: DisplayConfig,
    /// Desktop notification settings.
    pub notifications: NotifyConfig,
    /// Device snapshot source.
    pub provider: ProviderConfig,
}

/// Header / icon display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// When the indicator icon should be shown.
    pub icon_policy: IconPolicy,
    /// Append the time estimate to the header label.
    pub show_time: bool,
    /// Append the charge percentage to the header label.
    pub show_percentage: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            icon_policy: IconPolicy::Present,
            show_time: false,
            show_percentage: true,
        }
    }
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Master switch for low-battery notifications.
    pub enable: bool,
    /// Bubble timeout in milliseconds (-1 = notification server default).
    pub timeout_ms: i32,
    /// Directory holding the notification sound assets.
    pub sounds_dir: PathBuf,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enable: true,
            timeout_ms: -1,
            sounds_dir: PathBuf::from("/usr/share/sounds"),
        }
    }
}

/// Device snapshot source.
///
/// The indicator does not poll hardware itself; it consumes snapshots from
/// whatever provider is wired in. The stock binary can replay a recorded
/// snapshot sequence from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON file holding a sequence of device-set snapshots to replay.
    pub replay_file: Option<PathBuf>,
    /// Milliseconds between replayed snapshots.
    pub replay_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            replay_file: None,
            replay_interval_ms: 2_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = IndicatorConfig::default();
        assert_eq!(config.display.icon_policy, IconPolicy::Present);
        assert!(!config.display.show_time);
        assert!(config.display.show_percentage);
        assert!(config.notifications.enable);
        assert_eq!(config.provider.replay_file, None);
    }

    #[test]
    fn parses_partial_config() {
        let raw = r#"
            [display]
            icon_policy = "charge"
            show_time = true

            [notifications]
            timeout_ms = 5000
        "#;

        let config: IndicatorConfig = toml::from_str(raw).expect("valid TOML");
        assert_eq!(config.display.icon_policy, IconPolicy::Charge);
        assert!(config.display.show_time);
        // untouched sections keep their defaults
        assert!(config.display.show_percentage);
        assert_eq!(config.notifications.timeout_ms, 5000);
        assert_eq!(config.provider.replay_interval_ms, 2_000);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: IndicatorConfig = toml::from_str("").expect("valid TOML");
        assert_eq!(config.display.icon_policy, IconPolicy::Present);
    }
}
