//! Library-level log macros.
//!
//! With the `logging` feature these forward to `tracing`; without it they
//! expand to nothing.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! debug!(records = log.len(), "history loaded");
//! warn!(error = %e, "history blob is unreadable");
//! ```

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Lifecycle events: store opened, quiz finished, log cleared.
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Handled surprises: unreadable history, stray answers.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Failures handed back to the caller, e.g. a history write that did not land.
#[cfg(feature = "logging")]
macro_rules! log_error {
    ($($arg:tt)*) => { tracing::error!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_error as error;
pub(crate) use log_info as info;
pub(crate) use log_warn as warn;
