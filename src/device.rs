//! The operations a capture session performs on a camera

use crate::{file::CameraFilePath, tree::ConfigNode, Camera, Result};
use std::path::Path;

/// Camera as seen by [`session::run`](crate::session::run)
pub trait Device {
  /// Connect to the camera
  fn init(&mut self) -> Result<()>;

  /// String value of a single configuration
  fn config_value(&self, key: &str) -> Result<String>;

  /// Set and apply the string value of a single configuration
  fn set_config_value(&self, key: &str, value: &str) -> Result<()>;

  /// Snapshot of the full configuration tree
  fn config_tree(&self) -> Result<ConfigNode>;

  /// Capture an image, leaving it on the camera
  fn capture_image(&self) -> Result<CameraFilePath>;

  /// Download a file to the host, returning the number of bytes written
  fn download(&self, path: &CameraFilePath, dest: &Path) -> Result<u64>;

  /// Delete a file from the camera
  fn delete(&self, path: &CameraFilePath) -> Result<()>;

  /// Close the connection
  fn exit(&mut self) -> Result<()>;
}

impl Device for Camera {
  fn init(&mut self) -> Result<()> {
    Camera::init(self)
  }

  fn config_value(&self, key: &str) -> Result<String> {
    Camera::config_value(self, key)
  }

  fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
    Camera::set_config_value(self, key, value)
  }

  fn config_tree(&self) -> Result<ConfigNode> {
    Ok(ConfigNode::snapshot(&self.config()?))
  }

  fn capture_image(&self) -> Result<CameraFilePath> {
    Camera::capture_image(self)
  }

  fn download(&self, path: &CameraFilePath, dest: &Path) -> Result<u64> {
    Camera::download(self, path, dest)?.size()
  }

  fn delete(&self, path: &CameraFilePath) -> Result<()> {
    Camera::delete(self, path)
  }

  fn exit(&mut self) -> Result<()> {
    Camera::exit(self)
  }
}
