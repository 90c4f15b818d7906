#![doc = include_str!("../README.md")]
#![deny(unused_must_use)]
#![deny(missing_docs)] // Force documentation on all public API's

pub mod camera;
pub mod context;
pub mod device;
pub mod error;
pub mod file;
pub(crate) mod helper;
pub mod log;
pub mod session;
pub mod tree;
pub mod widget;

use std::ffi::CStr;

#[doc(inline)]
pub use crate::{
  camera::Camera,
  context::Context,
  device::Device,
  error::{Error, Result},
};

/// Raw bindings to libgphoto2.
///
/// Use this at your own risk
pub use libgphoto2_sys;

/// Get the short version of the libgphoto2 library used
pub fn library_version() -> Option<&'static str> {
  unsafe {
    CStr::from_ptr(*libgphoto2_sys::gp_library_version(
      libgphoto2_sys::GPVersionVerbosity::GP_VERSION_SHORT,
    ))
    .to_str()
    .ok()
  }
}

#[cfg(test)]
#[test]
fn test_version() {
  let version = library_version().unwrap();
  assert!(version.starts_with("2."), "unexpected libgphoto2 version {}", version);
}
