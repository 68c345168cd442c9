//! Banter is a crate providing user-friendly building blocks for
//! console-based interaction: styled logging, stacked spinners, transient
//! progress bars and small text helpers.
//!
//! # Quick Start
//!
//! ```rust
//! use banter::{logging, Console, Progress};
//!
//! # fn main() -> Result<(), banter::Error> {
//! let console = Console::new();
//! let mut args: Vec<String> = std::env::args().collect();
//! logging::init(&console, &mut args)?;
//!
//! {
//!     let spinner = console.spinner("Fetching [bold]metadata[/bold]");
//!     log::info!("printed above the spinner");
//!     spinner.update("Still fetching");
//! }
//!
//! let bar = Progress::new(&console, false);
//! bar.set_description("Processing");
//! bar.start();
//! bar.set_length(3);
//! bar.inc(3);
//! bar.stop();
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The banter crate is organized into several modules:
//!
//! - [`console`] - The shared `Console` service coordinating terminal output
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`logging`] - The `ConsoleLogger` handler, log level selection and silencing
//! - [`progress`] - The transient `Progress` bar
//! - [`status`] - Stacked `Spinner` displays and their lifecycle
//! - [`strings`] - Text preparation helpers
//! - [`theme`] - Style aliases and markup rendering

pub mod console;
pub mod error;
pub mod logging;
pub mod progress;
pub mod status;
pub mod strings;
pub mod theme;

pub use console::Console;
pub use error::{Error, Result};
pub use logging::{silence_loggers, ConsoleLogger, SilenceGuard};
pub use progress::Progress;
pub use status::{DisplayState, Spinner};
pub use strings::{join, join_and, join_bullet, join_or, list_styles, normalize_indent};
pub use theme::Theme;
