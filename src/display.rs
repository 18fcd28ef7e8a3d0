//! Text block formatting and the surfaces it is rendered on

use crate::collectors::performance::LevelKey;
use crate::data::SampleResult;
use std::io::Write;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

/// Where the overlay text ends up
pub trait TextSurface {
    fn set_text(&mut self, text: &str);
    fn set_font_size(&mut self, size: f32);
    /// Width and height of the container the text is laid out in
    fn container_size(&self) -> (f32, f32);
}

/// Everything shown on one refresh
#[derive(Debug, Clone)]
pub struct OverlayReport {
    pub device_label: Option<&'static str>,
    pub fps: f32,
    pub sample: SampleResult,
    pub levels: Vec<(LevelKey, String)>,
}

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub separator: String,
    pub fps_precision: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            separator: " : ".to_string(),
            fps_precision: 1,
        }
    }
}

pub const UNKNOWN_DEVICE_LINE: &str = "Unknown device";

/// Build the multi-line overlay text. Line order is fixed.
pub fn format_text_block(report: &OverlayReport, style: &TextStyle) -> String {
    let sep = &style.separator;
    let sample = &report.sample;

    let mut lines = Vec::with_capacity(5 + report.levels.len());
    lines.push(report.device_label.unwrap_or(UNKNOWN_DEVICE_LINE).to_string());
    lines.push(format!("FPS{}{:.*}", sep, style.fps_precision, report.fps));
    lines.push(format!("CPU Temp{}{}", sep, sample.cpu_temp));
    lines.push(format!("GPU Busy{}{}", sep, sample.gpu_busy));
    lines.push(format!("GPU Clock{}{} / {}", sep, sample.gpu_clock, sample.gpu_max_clock));
    for (key, value) in &report.levels {
        lines.push(format!("{} Level{}{}", key, sep, value));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Font size for a container: its shorter side times `scale`
pub fn font_size_for(width: f32, height: f32, scale: f32) -> f32 {
    width.min(height) * scale
}

pub fn hex_to_ansi(color: &str) -> String {
    // First try ANSI color names
    if let Some(ansi_code) = get_ansi_color_code(color) {
        return ansi_code.to_string();
    }

    // Fallback to hex color parsing for custom colors
    if color.starts_with('#') && color.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&color[1..3], 16),
            u8::from_str_radix(&color[3..5], 16),
            u8::from_str_radix(&color[5..7], 16),
        ) {
            return format!("\x1b[38;2;{};{};{}m", r, g, b);
        }
    }

    warn!("Unknown color '{}', using default", color);
    RESET.to_string()
}

const RESET: &str = "\x1b[0m";

fn get_ansi_color_code(color_name: &str) -> Option<&'static str> {
    match color_name.to_lowercase().as_str() {
        "black" => Some("\x1b[30m"),
        "red" => Some("\x1b[31m"),
        "green" => Some("\x1b[32m"),
        "yellow" => Some("\x1b[33m"),
        "blue" => Some("\x1b[34m"),
        "magenta" | "purple" => Some("\x1b[35m"),
        "cyan" => Some("\x1b[36m"),
        "white" => Some("\x1b[37m"),
        "gray" | "grey" => Some("\x1b[90m"),
        "reset" | "default" => Some(RESET),
        _ => None,
    }
}

/// Renders the overlay in a terminal, redrawing in place.
/// The container is the terminal window measured in character cells.
pub struct TerminalSurface<W: Write> {
    out: W,
    color: String,
    fixed_size: Option<(f32, f32)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, color: Option<&str>) -> Self {
        Self {
            out,
            color: color.map(hex_to_ansi).unwrap_or_else(|| RESET.to_string()),
            fixed_size: None,
        }
    }

    /// Report a fixed container size instead of querying the terminal
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.fixed_size = Some((width, height));
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, text: &str) -> std::io::Result<()> {
        let width = text
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);

        write!(self.out, "\x1b[H\x1b[2J")?;
        for line in text.lines() {
            let padding = " ".repeat(width - UnicodeWidthStr::width(line));
            writeln!(self.out, "{}{}{}{}", self.color, line, padding, RESET)?;
        }
        self.out.flush()
    }
}

impl<W: Write> TextSurface for TerminalSurface<W> {
    fn set_text(&mut self, text: &str) {
        if let Err(err) = self.draw(text) {
            warn!("Failed to draw overlay: {}", err);
        }
    }

    fn set_font_size(&mut self, size: f32) {
        // Terminal cells have a fixed size
        debug!("Font size {} ignored by terminal", size);
    }

    fn container_size(&self) -> (f32, f32) {
        self.fixed_size.unwrap_or_else(terminal_size)
    }
}

/// Terminal size in cells, 80x24 when stdout isn't a terminal
fn terminal_size() -> (f32, f32) {
    unsafe {
        let mut size: libc::winsize = std::mem::zeroed();
        if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) == 0
            && size.ws_col > 0
            && size.ws_row > 0
        {
            return (size.ws_col as f32, size.ws_row as f32);
        }
    }
    (80.0, 24.0)
}
