//! Files stored on camera

use crate::{helper::chars_to_string, try_gp_internal, Result};
use std::{
  fmt, fs,
  os::unix::{
    fs::OpenOptionsExt,
    io::{FromRawFd, IntoRawFd},
  },
  path::Path,
};

/// Path of a file on the camera
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CameraFilePath {
  /// Folder containing the file
  pub folder: String,
  /// Basename of the file
  pub name: String,
}

impl CameraFilePath {
  /// Create a new path from folder and basename
  pub fn new(folder: impl Into<String>, name: impl Into<String>) -> Self {
    Self { folder: folder.into(), name: name.into() }
  }
}

impl From<libgphoto2_sys::CameraFilePath> for CameraFilePath {
  fn from(file_path: libgphoto2_sys::CameraFilePath) -> Self {
    Self {
      folder: chars_to_string(file_path.folder.as_ptr()),
      name: chars_to_string(file_path.name.as_ptr()),
    }
  }
}

impl fmt::Display for CameraFilePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.folder.ends_with('/') {
      write!(f, "{}{}", self.folder, self.name)
    } else {
      write!(f, "{}/{}", self.folder, self.name)
    }
  }
}

/// libgphoto2 file backed by a file on the host
pub struct CameraFile {
  pub(crate) inner: *mut libgphoto2_sys::CameraFile,
  // libgphoto2 owns and closes its own duplicate of this descriptor
  file: fs::File,
}

impl Drop for CameraFile {
  fn drop(&mut self) {
    unsafe {
      libgphoto2_sys::gp_file_unref(self.inner);
    }
  }
}

impl CameraFile {
  /// Create (or truncate) `path` and bind a libgphoto2 file to it
  pub fn from_path(path: &Path) -> Result<Self> {
    let file =
      fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o644).open(path)?;

    let fd = file.try_clone()?.into_raw_fd();

    let mut camera_file_ptr = unsafe { crate::helper::uninit() };
    let created = try_gp_internal!(libgphoto2_sys::gp_file_new_from_fd(&mut camera_file_ptr, fd));
    if let Err(err) = created {
      drop(unsafe { fs::File::from_raw_fd(fd) });
      return Err(err);
    }

    Ok(Self { inner: camera_file_ptr, file })
  }

  /// Number of bytes written to the host file so far
  pub fn size(&self) -> Result<u64> {
    Ok(self.file.metadata()?.len())
  }
}
