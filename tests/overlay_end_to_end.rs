use metrics_overlay::config::Config;
use metrics_overlay::utils::file::SysFs;
use metrics_overlay::{overlay_from_config, DeviceModel, DeviceProfile, MetricsOverlay, OverlaySettings, TextSurface};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[derive(Default)]
struct CapturedText {
    texts: Vec<String>,
    font_sizes: Vec<f32>,
}

impl TextSurface for CapturedText {
    fn set_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_sizes.push(size);
    }

    fn container_size(&self) -> (f32, f32) {
        (200.0, 100.0)
    }
}

fn write_node(root: &Path, path: &str, content: &str) {
    let full = root.join(path.trim_start_matches('/'));
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// Tick until the overlay refreshes once
fn run_until_refresh(overlay: &mut MetricsOverlay, surface: &mut CapturedText) {
    for _ in 0..100 {
        if overlay.tick(0.125, surface) {
            return;
        }
    }
    panic!("overlay never refreshed");
}

#[test]
fn galaxy_s6_reports_scaled_readings() {
    let tmp = tempdir().unwrap();
    write_node(tmp.path(), "/sys/devices/virtual/thermal/thermal_zone0/temp", "42000\n");
    write_node(tmp.path(), "/sys/devices/platform/gpusysfs/gpu_busy", "17\n");
    write_node(tmp.path(), "/sys/devices/platform/gpusysfs/gpu_clock", "700\n");
    write_node(tmp.path(), "/sys/devices/platform/gpusysfs/gpu_max_clock", "772\n");

    let profile = DeviceProfile::resolve("samsung SCV31");
    assert_eq!(profile.model, DeviceModel::GalaxyS6);

    let mut overlay = MetricsOverlay::new(
        OverlaySettings::default(),
        profile,
        Box::new(SysFs::with_root(tmp.path())),
    );
    let mut surface = CapturedText::default();
    run_until_refresh(&mut overlay, &mut surface);

    let lines: Vec<&str> = surface.texts[0].lines().collect();
    assert_eq!(lines[0], "Galaxy S6");
    assert_eq!(lines[2], "CPU Temp : 42");
    assert_eq!(lines[3], "GPU Busy : 17");
    assert_eq!(lines[4], "GPU Clock : 700 / 772");
    assert_eq!(surface.font_sizes, vec![100.0 * 0.025]);
}

#[test]
fn max_clock_is_read_once_at_startup() {
    let tmp = tempdir().unwrap();
    write_node(tmp.path(), "/sys/class/kgsl/kgsl-3d0/max_gpuclk", "624000000\n");
    write_node(tmp.path(), "/sys/class/kgsl/kgsl-3d0/gpuclk", "300000000\n");
    write_node(tmp.path(), "/sys/class/kgsl/kgsl-3d0/gpubusy", "  250  1000\n");

    let mut overlay = MetricsOverlay::new(
        OverlaySettings::default(),
        DeviceProfile::resolve("samsung SCV33"),
        Box::new(SysFs::with_root(tmp.path())),
    );
    write_node(tmp.path(), "/sys/class/kgsl/kgsl-3d0/max_gpuclk", "999000000\n");

    let mut surface = CapturedText::default();
    run_until_refresh(&mut overlay, &mut surface);

    let text = &surface.texts[0];
    assert!(text.starts_with("Galaxy S7\n"));
    assert!(text.contains("GPU Busy : 25\n"));
    assert!(text.contains("GPU Clock : 300 / 624\n"));
    // thermal zone absent on this tree
    assert!(text.contains("CPU Temp : -\n"));
}

#[test]
fn values_are_reread_on_every_refresh() {
    let tmp = tempdir().unwrap();
    let temp = "/sys/devices/virtual/thermal/thermal_zone0/temp";
    write_node(tmp.path(), temp, "4200\n");

    let mut overlay = MetricsOverlay::new(
        OverlaySettings::default(),
        DeviceProfile::resolve("samsung SCV33"),
        Box::new(SysFs::with_root(tmp.path())),
    );
    let mut surface = CapturedText::default();
    run_until_refresh(&mut overlay, &mut surface);

    fs::remove_file(tmp.path().join(temp.trim_start_matches('/'))).unwrap();
    run_until_refresh(&mut overlay, &mut surface);

    assert!(surface.texts[0].contains("CPU Temp : 420\n"));
    assert!(surface.texts[1].contains("CPU Temp : -\n"));
}

#[test]
fn config_drives_device_and_root() {
    let tmp = tempdir().unwrap();
    write_node(tmp.path(), "/sys/class/kgsl/kgsl-3d0/gpubusy", "garbage\n");

    let config = Config::from_toml(&format!(
        "[overlay]\nupdate_interval = 0.2\nseparator = \"=\"\n\n[device]\nmodel = \"samsung SCV33\"\nsysfs_root = \"{}\"\n\n[performance]\ngpu_level = 1.0\n",
        tmp.path().display()
    ))
    .unwrap();

    let mut overlay = overlay_from_config(&config);
    assert_eq!(overlay.profile().model, DeviceModel::GalaxyS7);

    let mut surface = CapturedText::default();
    run_until_refresh(&mut overlay, &mut surface);

    let text = &surface.texts[0];
    assert!(text.contains("GPU Busy=garbage\n"));
    assert!(text.contains("CPU Level=-\nGPU Level=1\n"));
}

#[test]
fn unknown_device_shows_placeholders() {
    let config = Config::from_toml("[device]\nmodel = \"Pixel 7\"\n").unwrap();
    let mut overlay = overlay_from_config(&config);
    let mut surface = CapturedText::default();
    run_until_refresh(&mut overlay, &mut surface);

    assert_eq!(
        surface.texts[0],
        "Unknown device\nFPS : 8.0\nCPU Temp : -\nGPU Busy : -\nGPU Clock : - / -\n"
    );
}
