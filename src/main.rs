//! Initialize the first detected camera, print its owner and configuration
//! tree, and optionally capture an image to a local file.

use camera_capture::{
  log::{LogBridge, LogLevel},
  session::{self, Options, DEFAULT_OWNER_KEY},
  Camera, Context,
};
use clap::Parser;
use std::{io, path::PathBuf, process::ExitCode};
use tracing_subscriber::{filter::LevelFilter, fmt::time::Uptime, prelude::*, EnvFilter};

/// Print a camera's configuration, optionally capturing an image.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
  /// Configuration queried and printed as the owner
  #[arg(long, default_value = DEFAULT_OWNER_KEY)]
  owner_key: String,

  /// Set `capturetarget` to this value before capturing
  #[arg(long, value_name = "VALUE")]
  capture_target: Option<String>,

  /// Capture an image and download it to this file
  #[arg(long, value_name = "FILE")]
  capture: Option<PathBuf>,

  /// Leave the captured image on the camera
  #[arg(long, requires = "capture")]
  keep: bool,

  /// Verbosity of libgphoto2's own log output (error, verbose, debug, data)
  #[arg(long, default_value_t = LogLevel::Error)]
  gp_log: LogLevel,
}

fn setup_logging() {
  let filter =
    EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();

  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_timer(Uptime::default()).with_writer(io::stdout))
    .with(filter)
    .init();
}

fn main() -> ExitCode {
  let args = Args::parse();

  setup_logging();
  tracing::debug!(version = ?camera_capture::library_version(), "using libgphoto2");

  let context = match Context::new() {
    Ok(context) => context,
    Err(err) => {
      tracing::error!("could not create context: {}", err);
      return ExitCode::FAILURE;
    }
  };

  let _log_bridge = match LogBridge::register(args.gp_log) {
    Ok(bridge) => Some(bridge),
    Err(err) => {
      tracing::warn!("could not register libgphoto2 log function: {}", err);
      None
    }
  };

  let mut camera = match Camera::new(&context) {
    Ok(camera) => camera,
    Err(err) => {
      tracing::error!("could not create camera: {}", err);
      return ExitCode::FAILURE;
    }
  };

  let options = Options {
    owner_key: args.owner_key,
    capture_target: args.capture_target,
    capture_to: args.capture,
    keep_on_camera: args.keep,
  };

  match session::run(&mut camera, &options, &mut io::stdout().lock()) {
    Ok(outcome) => ExitCode::from(outcome.exit_code()),
    Err(err) => {
      tracing::error!("could not write output: {}", err);
      ExitCode::FAILURE
    }
  }
}
