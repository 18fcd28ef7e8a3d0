//! The overlay component: frame accounting, periodic sampling and presentation

use crate::collectors::frame_rate::FrameRateState;
use crate::collectors::performance::{describe_level, request_level, LevelKey, PerformanceLevels};
use crate::collectors::sensors::Sampler;
use crate::config::Config;
use crate::data::DeviceProfile;
use crate::display::{font_size_for, format_text_block, OverlayReport, TextStyle, TextSurface};
use crate::utils::file::PseudoFs;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct OverlaySettings {
    pub update_interval: f32,
    pub font_size_scale: f32,
    pub style: TextStyle,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            update_interval: 0.25,
            font_size_scale: 0.025,
            style: TextStyle::default(),
        }
    }
}

impl From<&Config> for OverlaySettings {
    fn from(config: &Config) -> Self {
        Self {
            update_interval: config.overlay.update_interval,
            font_size_scale: config.overlay.font_size_scale,
            style: TextStyle {
                separator: config.overlay.separator.clone(),
                fps_precision: config.overlay.fps_precision,
            },
        }
    }
}

/// Diagnostic overlay driven by the host's frame loop.
///
/// Construct once at startup, call [`MetricsOverlay::tick`] every frame and
/// [`MetricsOverlay::shutdown`] when done.
pub struct MetricsOverlay {
    settings: OverlaySettings,
    sampler: Sampler,
    frame_rate: FrameRateState,
    gpu_max_clock: String,
    last_fps: f32,
    cached_size: Option<(f32, f32)>,
    levels: Option<Box<dyn PerformanceLevels>>,
}

impl MetricsOverlay {
    pub fn new(settings: OverlaySettings, profile: DeviceProfile, fs: Box<dyn PseudoFs>) -> Self {
        let sampler = Sampler::new(profile, fs);
        let gpu_max_clock = sampler.read_gpu_max_clock();
        info!(
            "Overlay started for {} (max GPU clock {})",
            profile.label, gpu_max_clock
        );

        Self {
            frame_rate: FrameRateState::new(settings.update_interval),
            settings,
            sampler,
            gpu_max_clock,
            last_fps: 0.0,
            cached_size: None,
            levels: None,
        }
    }

    /// Attach a performance-level service, requesting any given levels
    pub fn with_performance_levels(
        mut self,
        mut service: Box<dyn PerformanceLevels>,
        cpu_level: Option<f32>,
        gpu_level: Option<f32>,
    ) -> Self {
        if let Some(level) = cpu_level {
            request_level(service.as_mut(), LevelKey::Cpu, level);
        }
        if let Some(level) = gpu_level {
            request_level(service.as_mut(), LevelKey::Gpu, level);
        }
        self.levels = Some(service);
        self
    }

    pub fn profile(&self) -> &DeviceProfile {
        self.sampler.profile()
    }

    pub fn last_fps(&self) -> f32 {
        self.last_fps
    }

    /// Advance one frame of `delta` seconds.
    /// Returns true when the text was refreshed on this frame.
    pub fn tick(&mut self, delta: f32, surface: &mut dyn TextSurface) -> bool {
        let refreshed = match self.frame_rate.tick(delta) {
            Some(fps) => {
                self.last_fps = fps;
                let text = format_text_block(&self.report(fps), &self.settings.style);
                surface.set_text(&text);
                true
            }
            None => false,
        };

        self.follow_container(surface);
        refreshed
    }

    /// Sample every metric now
    pub fn report(&self, fps: f32) -> OverlayReport {
        let profile = self.sampler.profile();
        let levels = match &self.levels {
            Some(service) => [LevelKey::Cpu, LevelKey::Gpu]
                .into_iter()
                .map(|key| (key, describe_level(service.as_ref(), key)))
                .collect(),
            None => Vec::new(),
        };

        OverlayReport {
            device_label: profile.is_known().then_some(profile.label),
            fps,
            sample: self.sampler.sample(&self.gpu_max_clock),
            levels,
        }
    }

    fn follow_container(&mut self, surface: &mut dyn TextSurface) {
        let size = surface.container_size();
        if self.cached_size == Some(size) {
            return;
        }
        self.cached_size = Some(size);

        let font_size = font_size_for(size.0, size.1, self.settings.font_size_scale);
        debug!("Container resized to {}x{}, font size {}", size.0, size.1, font_size);
        surface.set_font_size(font_size);
    }

    pub fn shutdown(self) {
        info!("Overlay for {} shut down", self.sampler.profile().label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::performance::StaticLevels;
    use crate::data::DeviceModel;
    use crate::error::{OverlayError, Result};
    use crate::utils::file::NoFs;

    #[derive(Default)]
    struct RecordingSurface {
        texts: Vec<String>,
        font_sizes: Vec<f32>,
        size: (f32, f32),
    }

    impl TextSurface for RecordingSurface {
        fn set_text(&mut self, text: &str) {
            self.texts.push(text.to_string());
        }

        fn set_font_size(&mut self, size: f32) {
            self.font_sizes.push(size);
        }

        fn container_size(&self) -> (f32, f32) {
            self.size
        }
    }

    struct BrokenLevels;

    impl PerformanceLevels for BrokenLevels {
        fn level(&self, _key: LevelKey) -> Result<f32> {
            Err(OverlayError::PerformanceLevel("binding missing".to_string()))
        }

        fn set_level(&mut self, _key: LevelKey, _value: f32) -> Result<()> {
            Err(OverlayError::PerformanceLevel("binding missing".to_string()))
        }
    }

    fn overlay(interval: f32) -> MetricsOverlay {
        let settings = OverlaySettings {
            update_interval: interval,
            ..OverlaySettings::default()
        };
        MetricsOverlay::new(settings, DeviceProfile::for_model(DeviceModel::Unknown), Box::new(NoFs))
    }

    #[test]
    fn text_refreshes_only_when_interval_elapses() {
        let mut overlay = overlay(0.5);
        let mut surface = RecordingSurface::default();

        for _ in 0..4 {
            assert!(!overlay.tick(0.125, &mut surface));
        }
        assert!(surface.texts.is_empty());

        assert!(overlay.tick(0.125, &mut surface));
        assert_eq!(surface.texts.len(), 1);
        assert_eq!(overlay.last_fps(), 8.0);
        assert!(surface.texts[0].starts_with("Unknown device\nFPS : 8.0\n"));
        assert!(surface.texts[0].contains("GPU Clock : - / -\n"));
    }

    #[test]
    fn resize_is_independent_of_refresh() {
        let mut overlay = overlay(10.0);
        let mut surface = RecordingSurface {
            size: (200.0, 100.0),
            ..RecordingSurface::default()
        };

        overlay.tick(0.01, &mut surface);
        overlay.tick(0.01, &mut surface);
        assert_eq!(surface.font_sizes, vec![100.0 * 0.025]);

        surface.size = (50.0, 400.0);
        overlay.tick(0.01, &mut surface);
        assert_eq!(surface.font_sizes, vec![100.0 * 0.025, 50.0 * 0.025]);
        assert!(surface.texts.is_empty());
    }

    #[test]
    fn levels_are_requested_and_reported() {
        let overlay = overlay(0.25).with_performance_levels(Box::new(StaticLevels::new()), Some(3.0), None);
        let report = overlay.report(60.0);
        assert_eq!(
            report.levels,
            vec![(LevelKey::Cpu, "3".to_string()), (LevelKey::Gpu, "-".to_string())]
        );
    }

    #[test]
    fn failing_level_service_does_not_stop_rendering() {
        let mut overlay = overlay(0.1).with_performance_levels(Box::new(BrokenLevels), Some(1.0), Some(1.0));
        let mut surface = RecordingSurface::default();
        overlay.tick(0.05, &mut surface);
        assert!(overlay.tick(0.1, &mut surface));
        assert!(surface.texts[0].contains("CPU Level : -\nGPU Level : -\n"));
        overlay.shutdown();
    }
}
