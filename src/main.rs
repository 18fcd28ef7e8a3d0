use metrics_overlay::{config::load_config, overlay_from_config, TerminalSurface};
use std::{env, io, path::PathBuf, process, thread, time::{Duration, Instant}};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    frames: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        frames: None,
    };
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "-n" | "--frames" => {
                let count = iter.next().ok_or("--frames needs a count")?;
                args.frames = Some(count.parse().map_err(|_| format!("Invalid frame count: {}", count))?);
            }
            "-h" | "--help" => {
                println!("Usage: metrics-overlay [--config PATH] [--frames N]");
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(args)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let mut overlay = overlay_from_config(&config);
    let stdout = io::stdout();
    let mut surface = TerminalSurface::new(stdout.lock(), config.host.color.as_deref().map(|name| {
        config.colors.get(name).map(String::as_str).unwrap_or(name)
    }));

    let frame_time = Duration::from_secs_f64(1.0 / config.host.target_fps as f64);
    let mut last = Instant::now();
    let mut frame = 0u64;

    info!("Running at {} fps", config.host.target_fps);
    while args.frames.map_or(true, |limit| frame < limit) {
        thread::sleep(frame_time.saturating_sub(last.elapsed()));
        let now = Instant::now();
        let delta = now.duration_since(last).as_secs_f32();
        last = now;

        overlay.tick(delta, &mut surface);
        frame += 1;
    }

    overlay.shutdown();
}
