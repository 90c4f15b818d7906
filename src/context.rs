//! Library context

use crate::{camera::Camera, helper::chars_to_string, Error, Result};
use std::{
  os::raw::{c_char, c_void},
  ptr,
};

/// libgphoto2 context
///
/// Errors and status messages reported through the context are emitted as
/// [`tracing`] events with the target `camera_capture::context`.
pub struct Context {
  pub(crate) inner: *mut libgphoto2_sys::GPContext,
}

impl Drop for Context {
  fn drop(&mut self) {
    unsafe { libgphoto2_sys::gp_context_unref(self.inner) }
  }
}

impl Clone for Context {
  fn clone(&self) -> Self {
    unsafe { libgphoto2_sys::gp_context_ref(self.inner) };

    Self { inner: self.inner }
  }
}

impl Context {
  /// Create a new context
  pub fn new() -> Result<Self> {
    let context_ptr = unsafe { libgphoto2_sys::gp_context_new() };

    if context_ptr.is_null() {
      return Err(Error::new(libgphoto2_sys::GP_ERROR_NO_MEMORY));
    }

    unsafe {
      libgphoto2_sys::gp_context_set_error_func(context_ptr, Some(error_function), ptr::null_mut());
      libgphoto2_sys::gp_context_set_status_func(
        context_ptr,
        Some(status_function),
        ptr::null_mut(),
      );
    }

    Ok(Self { inner: context_ptr })
  }

  /// Create a camera and let libgphoto2 pick the first one it detects
  pub fn autodetect_camera(&self) -> Result<Camera> {
    let mut camera = Camera::new(self)?;
    camera.init()?;

    Ok(camera)
  }
}

unsafe extern "C" fn error_function(
  _context: *mut libgphoto2_sys::GPContext,
  text: *const c_char,
  _data: *mut c_void,
) {
  tracing::error!(target: "camera_capture::context", "{}", chars_to_string(text));
}

unsafe extern "C" fn status_function(
  _context: *mut libgphoto2_sys::GPContext,
  text: *const c_char,
  _data: *mut c_void,
) {
  tracing::info!(target: "camera_capture::context", "{}", chars_to_string(text));
}
