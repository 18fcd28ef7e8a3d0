//! Display values produced by one sampling pass

/// Most recent metric readings, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleResult {
    pub cpu_temp: String,
    pub gpu_busy: String,
    pub gpu_clock: String,
    /// Cached from startup; the max clock doesn't change at runtime
    pub gpu_max_clock: String,
}
