//! Styled logging through the console.
//!
//! [`ConsoleLogger`] is a [`log::Log`] implementation that renders records
//! through a [`Console`]: each line starts with a colored severity glyph,
//! multi-line messages are indentation-normalized and aligned under the
//! glyph, and output is routed above any live spinner or progress bar.
//!
//! [`init`] wires everything together for a typical binary: it takes the log
//! level from the command line (`-v LEVEL` or `--log-level LEVEL`), installs
//! the logger globally and flips the console into verbose mode when debug
//! output was requested.
//!
//! # Examples
//!
//! ```rust
//! use banter::{logging, Console};
//! use log::LevelFilter;
//!
//! let console = Console::new();
//! let mut args: Vec<String> = ["tool", "--log-level", "warn", "input.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let level = logging::init(&console, &mut args)?;
//! assert_eq!(level, LevelFilter::Warn);
//! assert_eq!(args, ["tool", "input.txt"]);
//! log::warn!("shown");
//! log::info!("filtered out");
//! # Ok::<(), banter::Error>(())
//! ```

use crate::console::Console;
use crate::error::{Error, Result};
use crate::strings;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

pub use log::{Level, LevelFilter};

/// Targets whose libraries log internals that users rarely want to see.
///
/// Records from these targets, and their descendant modules, only pass at
/// [`SILENCE_THRESHOLD`] or above.
pub const SILENCED_TARGETS: &[&str] = &["hyper", "mio", "reqwest", "rustls", "want"];

/// The level silenced targets are restricted to.
pub const SILENCE_THRESHOLD: LevelFilter = LevelFilter::Error;

static INSTALLED: OnceLock<ConsoleLogger> = OnceLock::new();

/// Returns the glyph identifying a severity level.
pub fn level_symbol(level: Level) -> char {
    match level {
        Level::Error => '-',
        Level::Warn => '!',
        Level::Info => 'i',
        Level::Debug => '#',
        Level::Trace => '~',
    }
}

/// Returns the bracketed glyph that prefixes every log line, e.g. `[i]`.
pub fn level_symbol_text(level: Level) -> String {
    format!("[{}]", level_symbol(level))
}

/// Extracts the log level value from a command line argument vector.
///
/// Recognized forms are `-v LEVEL`, `-vLEVEL`, `--log-level LEVEL` and
/// `--log-level=LEVEL`. The first match wins; the matched tokens are removed
/// from `args` so the remaining arguments can be handed to an argument
/// parser that knows nothing about logging.
///
/// A value is only recognized when it consists of letters, hyphens and
/// underscores. `-v 3` therefore matches nothing and is left in place, while
/// `-v --force` happily consumes `--force` as a (later rejected) level name,
/// matching what users get from getopt-style parsers.
///
/// # Examples
///
/// ```rust
/// use banter::logging::extract_log_level;
///
/// let mut args: Vec<String> = ["tool", "-v", "debug", "run"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(extract_log_level(&mut args).as_deref(), Some("debug"));
/// assert_eq!(args, ["tool", "run"]);
/// ```
pub fn extract_log_level(args: &mut Vec<String>) -> Option<String> {
    let mut index = 0;
    while index < args.len() {
        if args[index] == "-v" || args[index] == "--log-level" {
            if index + 1 < args.len() && is_level_token(&args[index + 1]) {
                let value = args.remove(index + 1);
                args.remove(index);
                return Some(value);
            }
        } else if let Some(rest) = args[index].strip_prefix("--log-level=") {
            if is_level_token(rest) {
                let value = rest.to_string();
                args.remove(index);
                return Some(value);
            }
        } else if let Some(rest) = args[index].strip_prefix("-v") {
            if is_level_token(rest) {
                let value = rest.to_string();
                args.remove(index);
                return Some(value);
            }
        }
        index += 1;
    }
    None
}

fn is_level_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-' || c == '_')
}

/// Parses a log level name, case-insensitively.
///
/// Accepts the five severity names of the `log` facade. Anything else is an
/// [`Error::InvalidLogLevel`] carrying the value upper-cased.
pub fn parse_level(value: &str) -> Result<LevelFilter> {
    let value = value.to_ascii_uppercase();
    match value.as_str() {
        "ERROR" => Ok(LevelFilter::Error),
        "WARN" => Ok(LevelFilter::Warn),
        "INFO" => Ok(LevelFilter::Info),
        "DEBUG" => Ok(LevelFilter::Debug),
        "TRACE" => Ok(LevelFilter::Trace),
        _ => Err(Error::InvalidLogLevel(value)),
    }
}

/// A [`log::Log`] implementation rendering records through a [`Console`].
///
/// The logger applies a base level plus per-target overrides. Overrides match
/// a target and all its descendant modules, the most specific one wins, and
/// [`SILENCED_TARGETS`] are overridden to [`SILENCE_THRESHOLD`] from the
/// start. Clones share the override table, which is what makes
/// [`silence`](Self::silence) guards work across the globally installed copy.
#[derive(Clone)]
pub struct ConsoleLogger {
    console: Console,
    level: LevelFilter,
    overrides: Arc<Mutex<HashMap<String, LevelFilter>>>,
}

impl ConsoleLogger {
    /// Creates a logger at the default `Info` level.
    pub fn new(console: &Console) -> Self {
        let overrides = SILENCED_TARGETS
            .iter()
            .map(|target| (target.to_string(), SILENCE_THRESHOLD))
            .collect();
        Self {
            console: console.clone(),
            level: LevelFilter::Info,
            overrides: Arc::new(Mutex::new(overrides)),
        }
    }

    /// Sets the base level.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Returns the base level.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Returns the effective level for a target, honoring overrides.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use banter::{Console, ConsoleLogger};
    /// use log::LevelFilter;
    ///
    /// let logger = ConsoleLogger::new(&Console::new());
    /// assert_eq!(logger.level_for("myapp"), LevelFilter::Info);
    /// assert_eq!(logger.level_for("hyper::client"), LevelFilter::Error);
    /// ```
    pub fn level_for(&self, target: &str) -> LevelFilter {
        let Ok(overrides) = self.overrides.lock() else {
            return self.level;
        };
        overrides
            .iter()
            .filter(|(name, _)| target_matches(name, target))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, level)| *level)
            .unwrap_or(self.level)
    }

    /// Temporarily restricts targets to [`SILENCE_THRESHOLD`].
    ///
    /// The returned guard restores each target to its prior state when
    /// dropped, including during unwinding, so a panicking block cannot leave
    /// a target muted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use banter::{Console, ConsoleLogger};
    /// use log::LevelFilter;
    ///
    /// let logger = ConsoleLogger::new(&Console::new());
    /// {
    ///     let _quiet = logger.silence(&["chatty::module"]);
    ///     assert_eq!(logger.level_for("chatty::module"), LevelFilter::Error);
    /// }
    /// assert_eq!(logger.level_for("chatty::module"), LevelFilter::Info);
    /// ```
    pub fn silence<S: AsRef<str>>(&self, targets: &[S]) -> SilenceGuard {
        let mut previous = Vec::with_capacity(targets.len());
        if let Ok(mut overrides) = self.overrides.lock() {
            for target in targets {
                let target = target.as_ref().to_string();
                let prior = overrides.insert(target.clone(), SILENCE_THRESHOLD);
                previous.push((target, prior));
            }
        }
        SilenceGuard {
            logger: Some(self.clone()),
            previous,
        }
    }

    /// Installs this logger as the global `log` handler.
    ///
    /// Fails with [`Error::LoggerInstall`] if a global logger, from this
    /// crate or any other, is already in place.
    pub fn install(self) -> Result<()> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(self.level);
        let _ = INSTALLED.set(self);
        Ok(())
    }

    /// Formats a record's message body as markup text.
    ///
    /// The message is indentation-normalized; in verbose mode it is prefixed
    /// with the record's target so interleaved output stays attributable.
    pub fn format_record(&self, record: &log::Record) -> String {
        let message = record.args().to_string();
        let message = if self.console.is_verbose() {
            format!("[color.black]({})[/color.black] {}", record.target(), message)
        } else {
            message
        };
        strings::normalize_indent(&message)
    }

    /// Formats the final output line for a record: severity glyph, then the
    /// rendered message, with continuation lines aligned under the first.
    pub fn format_line(&self, record: &log::Record) -> String {
        let body = self.console.render_str(&self.format_record(record));
        let style = format!(
            "logging.level.{}",
            record.level().to_string().to_ascii_lowercase()
        );
        let tag = self
            .console
            .render_str(&self.console.theme().stylize(&level_symbol_text(record.level()), &style));
        let mut lines = body.lines();
        let mut out = format!("{tag} {}", lines.next().unwrap_or(""));
        for line in lines {
            out.push_str("\n    ");
            out.push_str(line);
        }
        out
    }
}

fn target_matches(name: &str, target: &str) -> bool {
    target == name
        || target
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let line = self.format_line(record);
            self.console.print_line(&line);
        }
    }

    fn flush(&self) {}
}

/// Guard restoring silenced targets to their prior levels on drop.
#[must_use = "dropping the guard immediately restores the silenced targets"]
pub struct SilenceGuard {
    logger: Option<ConsoleLogger>,
    previous: Vec<(String, Option<LevelFilter>)>,
}

impl Drop for SilenceGuard {
    fn drop(&mut self) {
        let Some(logger) = &self.logger else { return };
        let Ok(mut overrides) = logger.overrides.lock() else {
            return;
        };
        // Restore newest first so repeated targets unwind to the true prior
        // state.
        for (target, prior) in self.previous.drain(..).rev() {
            match prior {
                Some(level) => overrides.insert(target, level),
                None => overrides.remove(&target),
            };
        }
    }
}

/// Returns a handle to the globally installed logger, if any.
pub fn installed() -> Option<ConsoleLogger> {
    INSTALLED.get().cloned()
}

/// Temporarily silences targets on the globally installed logger.
///
/// Convenience wrapper over [`ConsoleLogger::silence`] for code that does not
/// hold a logger handle. Before [`init`] has run the returned guard does
/// nothing.
pub fn silence_loggers<S: AsRef<str>>(targets: &[S]) -> SilenceGuard {
    match INSTALLED.get() {
        Some(logger) => logger.silence(targets),
        None => SilenceGuard {
            logger: None,
            previous: Vec::new(),
        },
    }
}

/// Sets up console logging for a binary.
///
/// Reads the desired level from `args` (removing the consumed tokens),
/// defaulting to `Info`, installs a [`ConsoleLogger`] globally and puts the
/// console into verbose mode when the level includes debug output. Returns
/// the selected level.
///
/// # Errors
///
/// Fails if the extracted level name is invalid or if a global logger is
/// already installed.
pub fn init(console: &Console, args: &mut Vec<String>) -> Result<LevelFilter> {
    let level = match extract_log_level(args) {
        Some(value) => parse_level(&value)?,
        None => LevelFilter::Info,
    };
    console.set_verbose(level >= LevelFilter::Debug);
    ConsoleLogger::new(console).with_level(level).install()?;
    if console.is_verbose() {
        log::warn!(
            "Verbose logging changes how live displays behave:\n{}",
            strings::join_bullet(&[
                "spinners are replaced with plain log lines",
                "progress output may interleave with log records",
            ])
        );
    }
    Ok(level)
}
