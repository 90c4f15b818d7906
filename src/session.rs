//! One run of the capture program: init, owner, configuration tree, optional capture

use crate::{device::Device, error::GP_OK, tree, Error, Result};
use std::{
  io::{self, Write},
  os::raw::c_int,
  path::{Path, PathBuf},
};

/// Configuration name queried when none is given
pub const DEFAULT_OWNER_KEY: &str = "ownername";

/// Configuration name written by the capture target step
pub const CAPTURE_TARGET_KEY: &str = "capturetarget";

/// What a run does besides printing the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
  /// Configuration queried and printed as the owner
  pub owner_key: String,
  /// Value written to `capturetarget` before capturing
  pub capture_target: Option<String>,
  /// Capture an image and download it here
  pub capture_to: Option<PathBuf>,
  /// Leave the captured image on the camera
  pub keep_on_camera: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      owner_key: DEFAULT_OWNER_KEY.to_string(),
      capture_target: None,
      capture_to: None,
      keep_on_camera: false,
    }
  }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Every step ran, failures after init were printed and skipped
  Completed,
  /// The camera could not be initialized
  InitFailed(Error),
}

impl Outcome {
  /// Process exit status for this outcome
  pub fn exit_code(&self) -> u8 {
    match self {
      Outcome::Completed => 0,
      Outcome::InitFailed(_) => 1,
    }
  }
}

fn retval<T>(result: &Result<T>) -> c_int {
  match result {
    Ok(_) => GP_OK,
    Err(err) => err.code(),
  }
}

/// Run all steps against `device`, printing progress to `out`
///
/// Only a failed init stops the run. Everything else prints the return code
/// and moves on.
pub fn run<D: Device, W: Write>(
  device: &mut D,
  options: &Options,
  out: &mut W,
) -> io::Result<Outcome> {
  writeln!(out, "Camera init.  Takes about 10 seconds.")?;
  if let Err(err) = device.init() {
    writeln!(out, "  Retval: {}", err.code())?;
    tracing::error!("camera init failed: {}", err);
    return Ok(Outcome::InitFailed(err));
  }

  match device.config_value(&options.owner_key) {
    Ok(owner) => writeln!(out, "Owner is {}", owner)?,
    Err(err) => {
      tracing::debug!(key = %options.owner_key, "owner query failed: {}", err);
      writeln!(out, "Could not query owner.")?;
    }
  }

  print_config(device, out)?;

  if let Some(target) = &options.capture_target {
    set_capture_target(device, target, out)?;
  }

  if let Some(dest) = &options.capture_to {
    capture_to_file(device, dest, options.keep_on_camera, out)?;
  }

  if let Err(err) = device.exit() {
    tracing::warn!("camera exit failed: {}", err);
  }

  Ok(Outcome::Completed)
}

fn print_config<D: Device, W: Write>(device: &D, out: &mut W) -> io::Result<()> {
  match device.config_tree() {
    Ok(root) => {
      tracing::debug!(widgets = root.descendant_count(), "fetched configuration");
      tree::render(&root, out)
    }
    Err(err) => {
      writeln!(out, "Could not get configuration.")?;
      writeln!(out, "  Retval: {}", err.code())
    }
  }
}

fn set_capture_target<D: Device, W: Write>(
  device: &D,
  target: &str,
  out: &mut W,
) -> io::Result<()> {
  writeln!(out, "Set {} to {}.", CAPTURE_TARGET_KEY, target)?;
  let result = device.set_config_value(CAPTURE_TARGET_KEY, target);
  writeln!(out, "  Retval: {}", retval(&result))
}

fn capture_to_file<D: Device, W: Write>(
  device: &D,
  dest: &Path,
  keep_on_camera: bool,
  out: &mut W,
) -> io::Result<()> {
  writeln!(out, "Capturing.")?;
  let captured = device.capture_image();
  writeln!(out, "  Retval: {}", retval(&captured))?;

  let path = match captured {
    Ok(path) => path,
    Err(err) => {
      tracing::error!("capture failed: {}", err);
      return Ok(());
    }
  };
  writeln!(out, "Pathname on the camera: {}", path)?;

  writeln!(out, "Downloading to {}.", dest.display())?;
  let downloaded = device.download(&path, dest);
  writeln!(out, "  Retval: {}", retval(&downloaded))?;
  match &downloaded {
    Ok(size) => tracing::info!(bytes = size, dest = %dest.display(), "downloaded {}", path),
    Err(err) => tracing::error!("download of {} failed: {}", path, err),
  }

  if keep_on_camera {
    return Ok(());
  }

  writeln!(out, "Deleting.")?;
  let deleted = device.delete(&path);
  writeln!(out, "  Retval: {}", retval(&deleted))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    file::CameraFilePath,
    tree::{tests::sample_tree, ConfigNode},
    widget::DisplayValue,
  };
  use std::cell::RefCell;

  #[derive(Default)]
  struct MockDevice {
    fail_init: Option<c_int>,
    fail_capture: bool,
    fail_set_config: bool,
    fail_download: bool,
    fail_delete: bool,
    no_config: bool,
    calls: RefCell<Vec<String>>,
  }

  impl MockDevice {
    fn record(&self, call: impl Into<String>) {
      self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
      self.calls.borrow().clone()
    }
  }

  impl Device for MockDevice {
    fn init(&mut self) -> Result<()> {
      self.record("init");
      match self.fail_init {
        Some(code) => Err(Error::new(code)),
        None => Ok(()),
      }
    }

    fn config_value(&self, key: &str) -> Result<String> {
      self.record(format!("config_value {}", key));
      match sample_tree().find(key) {
        Some(ConfigNode::Entry { value: DisplayValue::Text(text), .. }) => Ok(text.clone()),
        _ => Err(Error::new(libgphoto2_sys::GP_ERROR_BAD_PARAMETERS)),
      }
    }

    fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
      self.record(format!("set_config_value {} {}", key, value));
      if self.fail_set_config {
        Err(Error::new(libgphoto2_sys::GP_ERROR_NOT_SUPPORTED))
      } else {
        Ok(())
      }
    }

    fn config_tree(&self) -> Result<ConfigNode> {
      self.record("config_tree");
      if self.no_config {
        Err(Error::new(libgphoto2_sys::GP_ERROR_NOT_SUPPORTED))
      } else {
        Ok(sample_tree())
      }
    }

    fn capture_image(&self) -> Result<CameraFilePath> {
      self.record("capture_image");
      if self.fail_capture {
        Err(Error::new(libgphoto2_sys::GP_ERROR_CAMERA_BUSY))
      } else {
        Ok(CameraFilePath::new("/", "capt0000.jpg"))
      }
    }

    fn download(&self, path: &CameraFilePath, dest: &Path) -> Result<u64> {
      self.record(format!("download {} {}", path, dest.display()));
      if self.fail_download {
        Err(Error::new(libgphoto2_sys::GP_ERROR_IO))
      } else {
        Ok(4096)
      }
    }

    fn delete(&self, path: &CameraFilePath) -> Result<()> {
      self.record(format!("delete {}", path));
      if self.fail_delete {
        Err(Error::new(libgphoto2_sys::GP_ERROR_FILE_NOT_FOUND))
      } else {
        Ok(())
      }
    }

    fn exit(&mut self) -> Result<()> {
      self.record("exit");
      Ok(())
    }
  }

  fn run_mock(device: &mut MockDevice, options: &Options) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = run(device, options, &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
  }

  #[test]
  fn responsive_camera_prints_owner_and_tree() {
    let mut device = MockDevice::default();
    let (outcome, output) = run_mock(&mut device, &Options::default());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(outcome.exit_code(), 0);
    insta::assert_snapshot!(output.trim_end(), @r###"
    Camera init.  Takes about 10 seconds.
    Owner is Jane Doe
    settings - ?
        ownername - Jane Doe
        capturetarget - Internal RAM
        autopoweroff - ?
    status - ?
        serialnumber - ??
    Could not get child 1 (-2)
        batterylevel - 100%
    "###);
    assert_eq!(device.calls(), ["init", "config_value ownername", "config_tree", "exit"]);
  }

  #[test]
  fn failed_init_stops_the_run() {
    let mut device =
      MockDevice { fail_init: Some(libgphoto2_sys::GP_ERROR_IO), ..Default::default() };
    let (outcome, output) = run_mock(&mut device, &Options::default());

    assert_eq!(outcome, Outcome::InitFailed(Error::new(libgphoto2_sys::GP_ERROR_IO)));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(output, "Camera init.  Takes about 10 seconds.\n  Retval: -7\n");
    assert_eq!(device.calls(), ["init"]);
  }

  #[test]
  fn unknown_owner_key_is_not_fatal() {
    let mut device = MockDevice::default();
    let options = Options { owner_key: "artist".into(), ..Default::default() };
    let (outcome, output) = run_mock(&mut device, &options);

    assert_eq!(outcome, Outcome::Completed);
    assert!(output.contains("Could not query owner.\n"));
    assert!(output.contains("    ownername - Jane Doe\n"));
  }

  #[test]
  fn missing_configuration_prints_retval() {
    let mut device = MockDevice { no_config: true, ..Default::default() };
    let (outcome, output) = run_mock(&mut device, &Options::default());

    assert_eq!(outcome, Outcome::Completed);
    assert!(output.ends_with("Could not get configuration.\n  Retval: -6\n"));
  }

  #[test]
  fn capture_downloads_then_deletes() {
    let mut device = MockDevice::default();
    let options = Options {
      capture_target: Some("Memory card".into()),
      capture_to: Some(PathBuf::from("foo.cr2")),
      ..Default::default()
    };
    let (outcome, output) = run_mock(&mut device, &options);

    assert_eq!(outcome, Outcome::Completed);
    let capture_output = &output[output.find("Set capturetarget").unwrap()..];
    insta::assert_snapshot!(capture_output.trim_end(), @r###"
    Set capturetarget to Memory card.
      Retval: 0
    Capturing.
      Retval: 0
    Pathname on the camera: /capt0000.jpg
    Downloading to foo.cr2.
      Retval: 0
    Deleting.
      Retval: 0
    "###);
    assert_eq!(
      device.calls()[3..],
      [
        "set_config_value capturetarget Memory card",
        "capture_image",
        "download /capt0000.jpg foo.cr2",
        "delete /capt0000.jpg",
        "exit",
      ]
    );
  }

  #[test]
  fn keep_leaves_the_image_on_the_camera() {
    let mut device = MockDevice::default();
    let options = Options {
      capture_to: Some(PathBuf::from("foo.cr2")),
      keep_on_camera: true,
      ..Default::default()
    };
    let (_, output) = run_mock(&mut device, &options);

    assert!(!output.contains("Deleting."));
    assert!(!device.calls().iter().any(|call| call.starts_with("delete")));
  }

  #[test]
  fn failed_capture_skips_download() {
    let mut device = MockDevice { fail_capture: true, ..Default::default() };
    let options = Options { capture_to: Some(PathBuf::from("foo.cr2")), ..Default::default() };
    let (outcome, output) = run_mock(&mut device, &options);

    assert_eq!(outcome, Outcome::Completed);
    assert!(output.ends_with("Capturing.\n  Retval: -110\n"));
    assert_eq!(device.calls().last().map(String::as_str), Some("exit"));
  }

  #[test]
  fn failed_capture_target_write_is_not_fatal() {
    let mut device = MockDevice { fail_set_config: true, ..Default::default() };
    let options = Options {
      capture_target: Some("Memory card".into()),
      capture_to: Some(PathBuf::from("foo.cr2")),
      ..Default::default()
    };
    let (outcome, output) = run_mock(&mut device, &options);

    assert_eq!(outcome, Outcome::Completed);
    assert!(output.contains("Set capturetarget to Memory card.\n  Retval: -6\nCapturing.\n"));
    assert_eq!(device.calls().last().map(String::as_str), Some("exit"));
  }

  #[test]
  fn failed_download_still_deletes() {
    let mut device = MockDevice { fail_download: true, ..Default::default() };
    let options = Options { capture_to: Some(PathBuf::from("foo.cr2")), ..Default::default() };
    let (outcome, output) = run_mock(&mut device, &options);

    assert_eq!(outcome, Outcome::Completed);
    assert!(output.ends_with("Downloading to foo.cr2.\n  Retval: -7\nDeleting.\n  Retval: 0\n"));
    assert_eq!(
      device.calls()[3..],
      ["capture_image", "download /capt0000.jpg foo.cr2", "delete /capt0000.jpg", "exit"]
    );
  }

  #[test]
  fn failed_delete_still_exits() {
    let mut device = MockDevice { fail_delete: true, ..Default::default() };
    let options = Options { capture_to: Some(PathBuf::from("foo.cr2")), ..Default::default() };
    let (outcome, output) = run_mock(&mut device, &options);

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(outcome.exit_code(), 0);
    assert!(output.ends_with("Deleting.\n  Retval: -108\n"));
    assert_eq!(device.calls().last().map(String::as_str), Some("exit"));
  }
}
