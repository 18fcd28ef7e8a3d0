//! CPU/GPU performance levels exposed by the host platform

use crate::error::{OverlayError, Result};
use crate::utils::parsing::PLACEHOLDER;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKey {
    Cpu,
    Gpu,
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelKey::Cpu => write!(f, "CPU"),
            LevelKey::Gpu => write!(f, "GPU"),
        }
    }
}

/// Opaque platform binding that reports and requests performance tiers
pub trait PerformanceLevels {
    fn level(&self, key: LevelKey) -> Result<f32>;
    fn set_level(&mut self, key: LevelKey, value: f32) -> Result<()>;
}

/// Display string for a level, `-` when the service can't report it
pub fn describe_level(service: &dyn PerformanceLevels, key: LevelKey) -> String {
    match service.level(key) {
        Ok(value) => value.to_string(),
        Err(err) => {
            debug!("{} level unavailable: {}", key, err);
            PLACEHOLDER.to_string()
        }
    }
}

/// Request a level, logging instead of failing
pub fn request_level(service: &mut dyn PerformanceLevels, key: LevelKey, value: f32) {
    match service.set_level(key, value) {
        Ok(()) => debug!("Requested {} level {}", key, value),
        Err(err) => debug!("{} level request {} failed: {}", key, value, err),
    }
}

/// In-process level store for hosts without a native binding
#[derive(Debug, Clone, Default)]
pub struct StaticLevels {
    levels: HashMap<LevelKey, f32>,
}

impl StaticLevels {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PerformanceLevels for StaticLevels {
    fn level(&self, key: LevelKey) -> Result<f32> {
        self.levels
            .get(&key)
            .copied()
            .ok_or_else(|| OverlayError::PerformanceLevel(format!("{} level not set", key)))
    }

    fn set_level(&mut self, key: LevelKey, value: f32) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(OverlayError::PerformanceLevel(format!("invalid {} level {}", key, value)));
        }
        self.levels.insert(key, value);
        Ok(())
    }
}
