pub mod aggregate;
pub mod device;
pub mod display;
pub mod error;
pub mod event;
pub mod level;
pub mod warning;

pub use aggregate::{choose_primary, compare_devices, merge_batteries};
pub use device::{Device, DeviceKind, DeviceState};
pub use display::IconPolicy;
pub use error::{PowerError, Result};
pub use event::Message;
pub use level::PowerLevel;
pub use warning::{WarningTracker, WarningUpdate};
