//! Device profiles: which pseudo-files hold each metric and how to scale them

/// Supported hardware models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceModel {
    Unknown,
    /// Galaxy S6 (SCV31)
    GalaxyS6,
    /// Galaxy S7 (SCV33)
    GalaxyS7,
}

/// An integer pseudo-file and the divisor that brings it to display units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSource {
    pub path: &'static str,
    pub divisor: i64,
}

/// How a driver reports GPU load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyFormat {
    /// A single integer already in percent
    Scaled,
    /// Two integers: `busy_cycles total_cycles`
    Cycles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusySource {
    pub path: &'static str,
    pub format: BusyFormat,
}

/// Static per-model table entry. Unknown devices have no sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub model: DeviceModel,
    pub label: &'static str,
    pub cpu_temp: Option<MetricSource>,
    pub gpu_clock: Option<MetricSource>,
    pub gpu_max_clock: Option<MetricSource>,
    pub gpu_busy: Option<BusySource>,
}

const THERMAL_ZONE0: &str = "/sys/devices/virtual/thermal/thermal_zone0/temp";

pub const UNKNOWN: DeviceProfile = DeviceProfile {
    model: DeviceModel::Unknown,
    label: "Unknown device",
    cpu_temp: None,
    gpu_clock: None,
    gpu_max_clock: None,
    gpu_busy: None,
};

const GALAXY_S6: DeviceProfile = DeviceProfile {
    model: DeviceModel::GalaxyS6,
    label: "Galaxy S6",
    cpu_temp: Some(MetricSource { path: THERMAL_ZONE0, divisor: 1000 }),
    gpu_clock: Some(MetricSource { path: "/sys/devices/platform/gpusysfs/gpu_clock", divisor: 1 }),
    gpu_max_clock: Some(MetricSource { path: "/sys/devices/platform/gpusysfs/gpu_max_clock", divisor: 1 }),
    gpu_busy: Some(BusySource { path: "/sys/devices/platform/gpusysfs/gpu_busy", format: BusyFormat::Scaled }),
};

const GALAXY_S7: DeviceProfile = DeviceProfile {
    model: DeviceModel::GalaxyS7,
    label: "Galaxy S7",
    cpu_temp: Some(MetricSource { path: THERMAL_ZONE0, divisor: 10 }),
    gpu_clock: Some(MetricSource { path: "/sys/class/kgsl/kgsl-3d0/gpuclk", divisor: 1_000_000 }),
    gpu_max_clock: Some(MetricSource { path: "/sys/class/kgsl/kgsl-3d0/max_gpuclk", divisor: 1_000_000 }),
    gpu_busy: Some(BusySource { path: "/sys/class/kgsl/kgsl-3d0/gpubusy", format: BusyFormat::Cycles }),
};

/// Platform model strings, matched exactly
const PROFILES: &[(&str, DeviceProfile)] = &[
    ("samsung SCV31", GALAXY_S6),
    ("samsung SCV33", GALAXY_S7),
];

impl DeviceProfile {
    /// Look up the profile for a platform-reported model string
    pub fn resolve(model: &str) -> DeviceProfile {
        PROFILES
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, profile)| *profile)
            .unwrap_or(UNKNOWN)
    }

    pub fn for_model(model: DeviceModel) -> DeviceProfile {
        PROFILES
            .iter()
            .map(|(_, profile)| *profile)
            .find(|profile| profile.model == model)
            .unwrap_or(UNKNOWN)
    }

    pub fn is_known(&self) -> bool {
        self.model != DeviceModel::Unknown
    }
}
