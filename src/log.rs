//! Forward libgphoto2's log output to [`tracing`]

use crate::{helper::chars_to_string, try_gp_internal, Result};
use libgphoto2_sys::GPLogLevel;
use std::{
  fmt,
  os::raw::{c_char, c_int, c_void},
  ptr,
  str::FromStr,
};

/// Verbosity of the messages requested from libgphoto2
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
  /// Errors only
  #[default]
  Error,
  /// Errors and progress messages
  Verbose,
  /// Debug output of the drivers
  Debug,
  /// Debug output including hex dumps of the transferred data
  Data,
}

impl LogLevel {
  /// All levels, from least to most verbose
  pub const ALL: [LogLevel; 4] =
    [LogLevel::Error, LogLevel::Verbose, LogLevel::Debug, LogLevel::Data];

  fn as_str(self) -> &'static str {
    match self {
      LogLevel::Error => "error",
      LogLevel::Verbose => "verbose",
      LogLevel::Debug => "debug",
      LogLevel::Data => "data",
    }
  }
}

impl From<LogLevel> for GPLogLevel {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Error => GPLogLevel::GP_LOG_ERROR,
      LogLevel::Verbose => GPLogLevel::GP_LOG_VERBOSE,
      LogLevel::Debug => GPLogLevel::GP_LOG_DEBUG,
      LogLevel::Data => GPLogLevel::GP_LOG_DATA,
    }
  }
}

impl From<GPLogLevel> for LogLevel {
  fn from(level: GPLogLevel) -> Self {
    match level {
      GPLogLevel::GP_LOG_ERROR => LogLevel::Error,
      GPLogLevel::GP_LOG_VERBOSE => LogLevel::Verbose,
      GPLogLevel::GP_LOG_DEBUG => LogLevel::Debug,
      GPLogLevel::GP_LOG_DATA => LogLevel::Data,
    }
  }
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    LogLevel::ALL
      .into_iter()
      .find(|level| level.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| {
        format!("unknown log level `{}`, expected one of error, verbose, debug, data", s)
      })
  }
}

/// Registered libgphoto2 log function
///
/// Messages up to the requested [`LogLevel`] are emitted as [`tracing`] events
/// with the target `libgphoto2`. The function is unregistered on drop.
pub struct LogBridge {
  id: c_int,
}

impl LogBridge {
  /// Register the log function with libgphoto2
  pub fn register(level: LogLevel) -> Result<Self> {
    let id = try_gp_internal!(libgphoto2_sys::gp_log_add_func(
      level.into(),
      Some(log_function),
      ptr::null_mut()
    ))?;

    tracing::debug!(id, %level, "Registered libgphoto2 log function");

    Ok(Self { id })
  }
}

impl Drop for LogBridge {
  fn drop(&mut self) {
    unsafe {
      libgphoto2_sys::gp_log_remove_func(self.id);
    }
  }
}

unsafe extern "C" fn log_function(
  level: GPLogLevel,
  domain: *const c_char,
  message: *const c_char,
  _data: *mut c_void,
) {
  let domain = chars_to_string(domain);
  let message = chars_to_string(message);

  match LogLevel::from(level) {
    LogLevel::Error => tracing::error!(target: "libgphoto2", %domain, "{}", message),
    LogLevel::Verbose => tracing::info!(target: "libgphoto2", %domain, "{}", message),
    LogLevel::Debug => tracing::debug!(target: "libgphoto2", %domain, "{}", message),
    LogLevel::Data => tracing::trace!(target: "libgphoto2", %domain, "{}", message),
  }
}
