//! Runs against the virtual camera driver built by `libgphoto2_sys` with the `test` feature.
#![cfg(feature = "test")]

use camera_capture::{
  log::{LogBridge, LogLevel},
  session::{self, Options, Outcome},
  tree::ConfigNode,
  Camera, Context, Device,
};
use std::sync::Once;

fn sample_context() -> Context {
  static INIT: Once = Once::new();
  INIT.call_once(|| {
    tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").init();

    // Tell libgphoto2 to look for drivers in a custom built directory.
    camera_capture::libgphoto2_sys::test_utils::set_env();
  });

  Context::new().unwrap()
}

#[test]
fn init_and_read_config_tree() {
  let camera = sample_context().autodetect_camera().unwrap();

  let tree = camera.config_tree().unwrap();
  assert!(tree.descendant_count() > 0);
  assert!(matches!(tree, ConfigNode::Entry { .. }));
}

#[test]
fn capture_downloads_a_file() {
  let camera = sample_context().autodetect_camera().unwrap();
  let dir = tempfile::tempdir().unwrap();
  let dest = dir.path().join("capture.jpg");

  let path = camera.capture_image().unwrap();
  assert!(!path.name.is_empty());

  let size = Device::download(&camera, &path, &dest).unwrap();
  assert!(size > 0);
  assert_eq!(std::fs::metadata(&dest).unwrap().len(), size);
}

#[test]
fn full_session_completes() {
  let context = sample_context();
  let _bridge = LogBridge::register(LogLevel::Verbose).unwrap();
  let mut camera = Camera::new(&context).unwrap();
  let dir = tempfile::tempdir().unwrap();

  let options = Options { capture_to: Some(dir.path().join("foo.jpg")), ..Default::default() };
  let mut out = Vec::new();
  let outcome = session::run(&mut camera, &options, &mut out).unwrap();
  let output = String::from_utf8(out).unwrap();

  assert_eq!(outcome, Outcome::Completed);
  assert!(output.starts_with("Camera init.  Takes about 10 seconds.\n"));
  assert!(output.contains("Pathname on the camera: "));
  assert!(dir.path().join("foo.jpg").is_file());
}
