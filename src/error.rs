//! Error handling for the Banter library.
//!
//! This module provides centralized error handling for the few operations that
//! can actually fail: parsing a log level supplied on the command line and
//! installing the global logging handler. All errors implement the standard
//! Error trait and provide detailed context about failures.

use thiserror::Error;

/// Errors that can happen when using Banter.
#[derive(Error, Debug)]
pub enum Error {
    /// A log level name that does not match any of the supported severities.
    ///
    /// This variant is returned when a `-v`/`--log-level` value taken from the
    /// command line is not one of `error`, `warn`, `info`, `debug` or `trace`.
    /// The offending value is stored upper-cased.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// The global logging handler was already installed.
    ///
    /// The `log` facade only accepts a single global logger per process, so a
    /// second installation attempt surfaces as this variant.
    #[error("Logging handler already installed")]
    LoggerInstall {
        #[from]
        source: log::SetLoggerError,
    },
}

/// Result type alias for operations that can fail with a Banter error.
///
/// This type alias provides a convenient way to return results from Banter
/// operations without having to specify the full `Result<T, Error>` type
/// signature.
pub type Result<T> = std::result::Result<T, Error>;
