use std::{ffi, mem::MaybeUninit, os::raw::c_char};

/// Copy a C string owned by libgphoto2. Null pointers become an empty string.
pub fn chars_to_string(chars: *const c_char) -> String {
  if chars.is_null() {
    return String::new();
  }

  unsafe { String::from_utf8_lossy(ffi::CStr::from_ptr(chars).to_bytes()) }.into_owned()
}

/// Zeroed out-parameter for libgphoto2 calls.
///
/// Only used for raw pointers and plain C structs, for which all-zero is a valid value.
pub unsafe fn uninit<T>() -> T {
  MaybeUninit::zeroed().assume_init()
}

macro_rules! to_c_string {
  ($v:expr) => {
    std::ffi::CString::new($v)?
  };
}

pub(crate) use to_c_string;
