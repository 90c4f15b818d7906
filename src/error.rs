//! Error handling

use crate::helper::chars_to_string;
use std::{error, fmt, os::raw::c_int};

/// Result type used in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// i32 version of [`libgphoto2_sys::GP_OK`]
pub const GP_OK: c_int = libgphoto2_sys::GP_OK as c_int;

/// Error type
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ErrorKind {
  /// GP_ERROR or something else
  Other,
  /// Bad parameters were used
  BadParameters,
  /// The camera is busy
  CameraBusy,
  /// The camera returned an error
  CameraError,
  /// Corrupted data
  CorruptedData,
  /// The file already exists
  FileExists,
  /// The file was not found
  FileNotFound,
  /// Camera model not found
  ModelNotFound,
  /// Action not supported
  NotSupported,
  /// Memory error
  NoMemory,
  /// Io error
  Io,
  /// Timeout
  Timeout,
  /// Port is not known
  UnknownPort,
}

/// Error carrying a libgphoto2 return code
#[derive(Clone, PartialEq, Eq)]
pub struct Error {
  code: c_int,
  info: Option<String>,
}

impl Error {
  /// Creates a new error from a gphoto internal error
  pub fn new(code: c_int) -> Self {
    Self { code, info: None }
  }

  /// Creates a new error with additional information
  pub fn with_info(code: c_int, info: impl Into<String>) -> Self {
    Self { code, info: Some(info.into()) }
  }

  /// The raw libgphoto2 return code
  pub fn code(&self) -> c_int {
    self.code
  }

  /// Additional information attached to the error
  pub fn info(&self) -> Option<&str> {
    self.info.as_deref()
  }

  /// Map the gphoto return code to an [`ErrorKind`]
  pub fn kind(&self) -> ErrorKind {
    match self.code {
      libgphoto2_sys::GP_ERROR_BAD_PARAMETERS => ErrorKind::BadParameters,
      libgphoto2_sys::GP_ERROR_CAMERA_BUSY => ErrorKind::CameraBusy,
      libgphoto2_sys::GP_ERROR_CAMERA_ERROR => ErrorKind::CameraError,
      libgphoto2_sys::GP_ERROR_CORRUPTED_DATA => ErrorKind::CorruptedData,
      libgphoto2_sys::GP_ERROR_FILE_EXISTS => ErrorKind::FileExists,
      libgphoto2_sys::GP_ERROR_FILE_NOT_FOUND => ErrorKind::FileNotFound,
      libgphoto2_sys::GP_ERROR_MODEL_NOT_FOUND => ErrorKind::ModelNotFound,
      libgphoto2_sys::GP_ERROR_NOT_SUPPORTED => ErrorKind::NotSupported,
      libgphoto2_sys::GP_ERROR_NO_MEMORY => ErrorKind::NoMemory,
      libgphoto2_sys::GP_ERROR_IO => ErrorKind::Io,
      libgphoto2_sys::GP_ERROR_TIMEOUT => ErrorKind::Timeout,
      libgphoto2_sys::GP_ERROR_UNKNOWN_PORT => ErrorKind::UnknownPort,

      _ => ErrorKind::Other,
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(err: std::io::Error) -> Self {
    Self::with_info(libgphoto2_sys::GP_ERROR_IO, err.to_string())
  }
}

impl From<std::ffi::NulError> for Error {
  fn from(_: std::ffi::NulError) -> Self {
    Self::with_info(libgphoto2_sys::GP_ERROR, "FFI: NulError")
  }
}

impl From<&str> for Error {
  fn from(message: &str) -> Self {
    Self::with_info(libgphoto2_sys::GP_ERROR, message)
  }
}

impl From<String> for Error {
  fn from(message: String) -> Self {
    Self::with_info(libgphoto2_sys::GP_ERROR, message)
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&chars_to_string(unsafe { libgphoto2_sys::gp_result_as_string(self.code) }))?;

    if let Some(error_info) = &self.info {
      write!(f, " [{}]", error_info)?;
    }

    Ok(())
  }
}

impl fmt::Debug for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Error({}: ", self.code)?;
    <Self as fmt::Display>::fmt(self, f)?;
    f.write_str(")")
  }
}

impl error::Error for Error {}

/// Check the result of an internal libgphoto2 function.
///
/// If the return value is less than 0, an error is returned,
/// otherwise the return value itself
#[macro_export]
macro_rules! try_gp_internal {
  ($x:expr) => {{
    let v = unsafe { $x };

    if v >= 0 {
      Ok(v)
    } else {
      Err($crate::Error::new(v))
    }
  }};
}
