//! power-indicator — aggregates power-supply devices into a single status
//! summary and raises desktop notifications when the battery runs low.
//!
//! Run with:  `RUST_LOG=info power-indicator`

use anyhow::Result;
use power_config::{default_path, load as load_config, ConfigWatcher};
use power_core::display::{header_label, icon_name, should_be_visible};
use power_core::{Device, Message};
use power_notify::DesktopNotifier;
use power_system::{load_replay, spawn_replay, spawn_service};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("power-indicator v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = default_path();
    let mut config = load_config(&config_path).unwrap_or_default();

    // ── Device feed ───────────────────────────────────────────────────────────
    // The indicator consumes snapshots; it never polls hardware itself. The
    // stock binary replays a recorded snapshot sequence.
    let snapshots = match &config.provider.replay_file {
        Some(path) => {
            info!("Replaying device snapshots from {}", path.display());
            spawn_replay(load_replay(path)?, config.provider.replay_interval_ms)
        }
        None => {
            warn!("No device source configured; set [provider] replay_file");
            spawn_replay(Vec::new(), config.provider.replay_interval_ms)
        }
    };

    let mut messages = spawn_service(snapshots);
    let (_watcher, mut config_changed) = ConfigWatcher::spawn(&config_path);

    let mut notifier = match DesktopNotifier::connect(
        config.notifications.sounds_dir.clone(),
        config.notifications.timeout_ms,
    )
    .await
    {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Desktop notifications unavailable: {e}");
            None
        }
    };

    // ── Event loop ────────────────────────────────────────────────────────────
    let mut devices: Vec<Device> = Vec::new();
    let mut primary: Option<Device> = None;

    loop {
        tokio::select! {
            message = messages.recv() => {
                let Some(message) = message else { break };
                match message {
                    Message::DevicesChanged(set) => {
                        devices = set;
                        let visible = should_be_visible(config.display.icon_policy, &devices);
                        debug!(devices = devices.len(), visible, "device set updated");
                    }
                    Message::PrimaryChanged(new_primary) => {
                        primary = new_primary;
                        match &primary {
                            Some(device) => info!(
                                label = %header_label(
                                    device,
                                    config.display.show_time,
                                    config.display.show_percentage,
                                ),
                                icon = %icon_name(device),
                                state = device.state.as_str(),
                                "primary device"
                            ),
                            None => info!("no power device present"),
                        }
                    }
                    Message::BatteryStatus { level, is_warning } => {
                        info!(level = level.as_str(), is_warning, "battery status");
                    }
                    Message::Notify(level) => {
                        if !config.notifications.enable {
                            continue;
                        }
                        if let Some(notifier) = &mut notifier {
                            if let Err(e) = notifier.show(level, primary.as_ref()).await {
                                warn!("Could not show notification: {e}");
                            }
                        }
                    }
                    Message::ConfigReloaded => {}
                    Message::Shutdown => break,
                }
            }
            Some(()) = config_changed.recv() => {
                match load_config(&config_path) {
                    Ok(cfg) => {
                        info!("Config reloaded");
                        config = cfg;
                    }
                    Err(e) => warn!("Config reload failed: {e}"),
                }
            }
        }
    }

    info!("device feed ended; shutting down");
    Ok(())
}
