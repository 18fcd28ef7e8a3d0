//! metrics-overlay library
//!
//! An on-screen diagnostic overlay for Android devices: FPS, CPU temperature
//! and GPU load/clock read from device-specific sysfs pseudo-files.

pub mod error;
pub mod data;
pub mod collectors;
pub mod utils;
pub mod config;
pub mod display;
pub mod overlay;

pub use error::{OverlayError, Result};
pub use data::{DeviceModel, DeviceProfile, SampleResult};
pub use display::{TerminalSurface, TextSurface};
pub use overlay::{MetricsOverlay, OverlaySettings};

use collectors::performance::StaticLevels;
use utils::file::{PseudoFs, SysFs};

/// Build an overlay from configuration: detect the device, pick the
/// pseudo-file root and request any configured performance levels.
pub fn overlay_from_config(config: &config::Config) -> MetricsOverlay {
    let model = collectors::device::detect_device_model(config.device.model.as_deref());
    let profile = DeviceProfile::resolve(&model);

    let fs: Box<dyn PseudoFs> = match config.device.sysfs_root() {
        Some(root) => Box::new(SysFs::with_root(root)),
        None => Box::new(SysFs::new()),
    };

    let overlay = MetricsOverlay::new(OverlaySettings::from(config), profile, fs);
    let performance = &config.performance;
    if performance.cpu_level.is_some() || performance.gpu_level.is_some() {
        overlay.with_performance_levels(
            Box::new(StaticLevels::new()),
            performance.cpu_level,
            performance.gpu_level,
        )
    } else {
        overlay
    }
}
