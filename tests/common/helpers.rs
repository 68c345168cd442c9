use banter::{Console, ConsoleLogger, DisplayState, Spinner};
use log::{Level, Record};
use std::fmt::Arguments;

// Common test constants
pub const TEST_TARGET: &str = "banter_tests";

/// Creates a console with colors forced off so rendered output is plain text.
pub fn plain_console() -> Console {
    console::set_colors_enabled(false);
    Console::new()
}

/// Creates a console in verbose mode.
pub fn verbose_console() -> Console {
    let console = plain_console();
    console.set_verbose(true);
    console
}

/// Creates a logger over a plain console, never installed globally.
pub fn test_logger() -> ConsoleLogger {
    ConsoleLogger::new(&plain_console())
}

/// Creates a logger over a console in verbose mode.
pub fn verbose_logger() -> ConsoleLogger {
    ConsoleLogger::new(&verbose_console())
}

/// Builds a record and formats its message body.
pub fn format_body(logger: &ConsoleLogger, level: Level, target: &str, args: Arguments) -> String {
    logger.format_record(
        &Record::builder()
            .args(args)
            .level(level)
            .target(target)
            .build(),
    )
}

/// Builds a record and formats the full output line.
pub fn format_line(logger: &ConsoleLogger, level: Level, target: &str, args: Arguments) -> String {
    logger.format_line(
        &Record::builder()
            .args(args)
            .level(level)
            .target(target)
            .build(),
    )
}

/// Converts string literals into the owned argument vector `init` expects.
pub fn args_of(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

// === Assertion Helpers ===

/// Asserts a spinner is in the expected lifecycle state.
pub fn assert_state(spinner: &Spinner, expected: DisplayState) {
    assert_eq!(spinner.state(), expected, "Unexpected spinner state");
}

/// Asserts the console's stack size, live flag and paused flag at once.
pub fn assert_stack(console: &Console, len: usize, live: bool, paused: bool) {
    assert_eq!(console.stack_len(), len, "Unexpected stack size");
    assert_eq!(console.is_live(), live, "Unexpected live flag");
    assert_eq!(console.is_paused(), paused, "Unexpected paused flag");
}
