//! Camera related stuff

use crate::{
  file::{CameraFile, CameraFilePath},
  helper::{to_c_string, uninit},
  try_gp_internal,
  widget::Widget,
  Context, Result,
};
use std::path::Path;

/// Represents a camera
pub struct Camera {
  pub(crate) camera: *mut libgphoto2_sys::Camera,
  pub(crate) context: Context,
}

impl Drop for Camera {
  fn drop(&mut self) {
    unsafe {
      libgphoto2_sys::gp_camera_unref(self.camera);
    }
  }
}

impl Camera {
  /// Create a camera handle, not yet connected to any device
  pub fn new(context: &Context) -> Result<Self> {
    let mut camera_ptr = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_camera_new(&mut camera_ptr))?;

    Ok(Self { camera: camera_ptr, context: context.clone() })
  }

  /// Connect to the first detected camera
  ///
  /// Depending on the driver this can take several seconds, the PTP driver
  /// walks the whole filesystem of the camera.
  pub fn init(&mut self) -> Result<()> {
    try_gp_internal!(libgphoto2_sys::gp_camera_init(self.camera, self.context.inner))?;

    Ok(())
  }

  /// Close the connection to the camera
  pub fn exit(&mut self) -> Result<()> {
    try_gp_internal!(libgphoto2_sys::gp_camera_exit(self.camera, self.context.inner))?;

    Ok(())
  }

  /// Get the camera configuration
  pub fn config(&self) -> Result<Widget> {
    let mut root_widget = unsafe { uninit() };

    try_gp_internal!(libgphoto2_sys::gp_camera_get_config(
      self.camera,
      &mut root_widget,
      self.context.inner
    ))?;

    Ok(Widget::new_owned(root_widget))
  }

  /// Get a single configuration widget by name
  ///
  /// Drivers that cannot look up single widgets are served from the full
  /// configuration, matching the key against widget names, then labels.
  pub fn config_key(&self, key: &str) -> Result<Widget> {
    let c_key = to_c_string!(key);
    let mut widget = unsafe { uninit() };

    let single = try_gp_internal!(libgphoto2_sys::gp_camera_get_single_config(
      self.camera,
      c_key.as_ptr(),
      &mut widget,
      self.context.inner
    ));

    match single {
      Ok(_) => Ok(Widget::new_owned(widget)),
      Err(err) => {
        tracing::debug!(key, "single config lookup failed ({}), searching full config", err);

        let root = self.config()?;
        root.child_by_name(key).or_else(|_| root.child_by_label(key))
      }
    }
  }

  /// String value of a text, radio or menu configuration
  pub fn config_value(&self, key: &str) -> Result<String> {
    self.config_key(key)?.text()
  }

  /// Set the string value of a text, radio or menu configuration and apply it
  pub fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
    let widget = self.config_key(key)?;
    widget.set_text(value)?;

    let c_key = to_c_string!(key);
    let single = try_gp_internal!(libgphoto2_sys::gp_camera_set_single_config(
      self.camera,
      c_key.as_ptr(),
      widget.inner,
      self.context.inner
    ));

    if let Err(err) = single {
      tracing::debug!(key, "single config update failed ({}), writing full config", err);

      let root = self.config()?;
      root.child_by_name(key).or_else(|_| root.child_by_label(key))?.set_text(value)?;
      self.set_config(&root)?;
    }

    Ok(())
  }

  /// Apply a configuration tree to the camera
  pub fn set_config(&self, config: &Widget) -> Result<()> {
    try_gp_internal!(libgphoto2_sys::gp_camera_set_config(
      self.camera,
      config.inner,
      self.context.inner
    ))?;

    Ok(())
  }

  /// Capture image
  ///
  /// ## Returns
  ///
  /// A [`CameraFilePath`] which can be downloaded to the host system
  pub fn capture_image(&self) -> Result<CameraFilePath> {
    let mut file_path: libgphoto2_sys::CameraFilePath = unsafe { uninit() };

    try_gp_internal!(libgphoto2_sys::gp_camera_capture(
      self.camera,
      libgphoto2_sys::CameraCaptureType::GP_CAPTURE_IMAGE,
      &mut file_path,
      self.context.inner
    ))?;

    Ok(file_path.into())
  }

  /// Download a file from the camera to `dest` on the host
  pub fn download(&self, path: &CameraFilePath, dest: &Path) -> Result<CameraFile> {
    let folder = to_c_string!(path.folder.as_str());
    let name = to_c_string!(path.name.as_str());
    let camera_file = CameraFile::from_path(dest)?;

    try_gp_internal!(libgphoto2_sys::gp_camera_file_get(
      self.camera,
      folder.as_ptr(),
      name.as_ptr(),
      libgphoto2_sys::CameraFileType::GP_FILE_TYPE_NORMAL,
      camera_file.inner,
      self.context.inner
    ))?;

    Ok(camera_file)
  }

  /// Delete a file from the camera
  pub fn delete(&self, path: &CameraFilePath) -> Result<()> {
    let folder = to_c_string!(path.folder.as_str());
    let name = to_c_string!(path.name.as_str());

    try_gp_internal!(libgphoto2_sys::gp_camera_file_delete(
      self.camera,
      folder.as_ptr(),
      name.as_ptr(),
      self.context.inner
    ))?;

    Ok(())
  }
}
