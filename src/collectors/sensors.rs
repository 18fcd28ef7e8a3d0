//! Sensor sampling: CPU temperature, GPU load and GPU clock from pseudo-files

use crate::data::{BusyFormat, DeviceProfile, MetricSource, SampleResult};
use crate::utils::file::{read_trimmed_file, PseudoFs};
use crate::utils::parsing::{busy_percent_from_cycles, scale_int, PLACEHOLDER};
use std::path::Path;

/// Reads the metrics described by a [`DeviceProfile`]
pub struct Sampler {
    profile: DeviceProfile,
    fs: Box<dyn PseudoFs>,
}

impl Sampler {
    pub fn new(profile: DeviceProfile, fs: Box<dyn PseudoFs>) -> Self {
        Self { profile, fs }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Trimmed content of a pseudo-file, empty if it can't be read
    pub fn read_trimmed_file(&self, path: &str) -> String {
        read_trimmed_file(self.fs.as_ref(), Path::new(path))
    }

    /// Integer reading divided by `divisor`, or the placeholder
    pub fn read_int_metric(&self, path: &str, divisor: i64) -> String {
        scale_int(&self.read_trimmed_file(path), divisor)
    }

    fn read_source(&self, source: Option<MetricSource>) -> String {
        match source {
            Some(source) => self.read_int_metric(source.path, source.divisor),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn read_cpu_temp(&self) -> String {
        self.read_source(self.profile.cpu_temp)
    }

    pub fn read_gpu_clock(&self) -> String {
        self.read_source(self.profile.gpu_clock)
    }

    pub fn read_gpu_max_clock(&self) -> String {
        self.read_source(self.profile.gpu_max_clock)
    }

    pub fn read_gpu_busy_percent(&self) -> String {
        match self.profile.gpu_busy {
            Some(source) => match source.format {
                BusyFormat::Scaled => self.read_int_metric(source.path, 1),
                BusyFormat::Cycles => busy_percent_from_cycles(&self.read_trimmed_file(source.path)),
            },
            None => PLACEHOLDER.to_string(),
        }
    }

    /// One sampling pass. `gpu_max_clock` is passed in from the startup cache.
    pub fn sample(&self, gpu_max_clock: &str) -> SampleResult {
        SampleResult {
            cpu_temp: self.read_cpu_temp(),
            gpu_busy: self.read_gpu_busy_percent(),
            gpu_clock: self.read_gpu_clock(),
            gpu_max_clock: gpu_max_clock.to_string(),
        }
    }
}
