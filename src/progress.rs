//! Transient progress bars.
//!
//! A [`Progress`] renders a single composite bar: severity glyph, themed
//! description, the bar itself, percentage, time remaining and time elapsed,
//! plus byte counters in download mode. While the bar runs, the spinner
//! stack is paused; stopping the bar clears it from the terminal and resumes
//! the stack.
//!
//! # Examples
//!
//! ```rust
//! use banter::{Console, Progress};
//!
//! let console = Console::new();
//! let bar = Progress::new(&console, false);
//! bar.set_description("Crunching numbers");
//! bar.start();
//! bar.set_length(3);
//! for _ in 0..3 {
//!     bar.inc(1);
//! }
//! bar.stop();
//! assert_eq!(bar.position(), 3);
//! ```

use crate::console::Console;
use crate::logging::level_symbol_text;
use crate::theme::Theme;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::Level;
use std::sync::atomic::{AtomicBool, Ordering};

/// Characters drawing the bar, a drawn-out line: `"━╾╴─"`.
pub const BAR_CHARS: &str = "━╾╴─";

/// Placeholder shown in place of the percentage before a length is known.
pub const INDETERMINATE_PERCENT: &str = "  -.--%";

/// Builds the template for the composite bar.
///
/// Column styles come from the theme's `progress.*` aliases. Until a length
/// is known the percentage column shows [`INDETERMINATE_PERCENT`]; download
/// mode appends byte counters. The literal `(elapsed)` label cannot take a
/// template style suffix, so it is rendered through the theme ahead of time
/// and embedded.
///
/// # Examples
///
/// ```rust
/// use banter::{progress::bar_template, Theme};
///
/// console::set_colors_enabled(true);
/// let template = bar_template(&Theme::default(), false, true);
/// assert!(template.contains("{percent_precise:>6.magenta}%"));
/// assert!(template.contains("\u{1b}[33m(elapsed)\u{1b}[0m"));
/// ```
pub fn bar_template(theme: &Theme, download: bool, determinate: bool) -> String {
    let mut template = String::from("{prefix} ");
    template.push_str(&placeholder("msg", "", &dotted_style(theme, "progress.description")));
    template.push_str(" {bar:40} ");
    if determinate {
        template.push_str(&placeholder(
            "percent_precise",
            ">6",
            &dotted_style(theme, "progress.percentage"),
        ));
        template.push('%');
    } else {
        template.push_str(INDETERMINATE_PERCENT);
    }
    template.push(' ');
    template.push_str(&placeholder("eta_precise", "", &dotted_style(theme, "progress.remaining")));
    template.push(' ');
    template.push_str(&placeholder("elapsed_precise", "", &dotted_style(theme, "progress.elapsed")));
    template.push(' ');
    template.push_str(&styled_label(theme, "(elapsed)", "progress.elapsed"));
    if download {
        template.push_str(" {bytes:>11.green}/{total_bytes:<11.green}");
    }
    template
}

/// Resolves a theme alias to the dotted form used inside bar templates.
///
/// Columns whose alias is not defined render unstyled.
fn dotted_style(theme: &Theme, name: &str) -> String {
    if theme.get(name).is_none() {
        return String::new();
    }
    theme
        .resolve(name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
}

/// Renders a literal template label in a theme style.
///
/// An undefined alias leaves the label plain, matching the unstyled columns.
fn styled_label(theme: &Theme, text: &str, style: &str) -> String {
    if theme.get(style).is_none() {
        return text.to_string();
    }
    theme.render(&theme.stylize(text, style))
}

/// Formats a `{key:spec.style}` template placeholder, leaving out the parts
/// that are empty.
fn placeholder(key: &str, spec: &str, style: &str) -> String {
    match (spec.is_empty(), style.is_empty()) {
        (true, true) => format!("{{{key}}}"),
        (true, false) => format!("{{{key}:.{style}}}"),
        (false, true) => format!("{{{key}:{spec}}}"),
        (false, false) => format!("{{{key}:{spec}.{style}}}"),
    }
}

fn bar_style(theme: &Theme, download: bool, determinate: bool) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&bar_template(theme, download, determinate))
        .unwrap()
        .progress_chars(BAR_CHARS)
}

/// A transient progress bar tied to a [`Console`].
///
/// The bar starts indeterminate; [`set_length`](Self::set_length) switches it
/// to a real percentage. [`start`](Self::start) pauses the console's spinner
/// stack and takes over the live region; [`stop`](Self::stop) clears the bar
/// and resumes the stack. Dropping a running bar stops it.
pub struct Progress {
    console: Console,
    bar: ProgressBar,
    download: bool,
    started: AtomicBool,
    determinate: AtomicBool,
}

impl Progress {
    /// Creates a bar, in download mode when `download` is set.
    ///
    /// Download mode adds byte counters for the position and total, sized
    /// for human-readable byte units.
    pub fn new(console: &Console, download: bool) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(bar_style(console.theme(), download, false));
        bar.set_prefix(
            console.render_str(&console.theme().stylize(
                &level_symbol_text(Level::Info),
                "logging.level.info",
            )),
        );
        Self {
            console: console.clone(),
            bar,
            download,
            started: AtomicBool::new(false),
            determinate: AtomicBool::new(false),
        }
    }

    /// Shows the bar, pausing the spinner stack first.
    ///
    /// Starting an already started bar does nothing.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        self.console.pause_stack();
        self.console.set_live(true);
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.console.set_live_display(Some(self.bar.clone()));
        self.bar.tick();
    }

    /// Clears the bar from the terminal and resumes the spinner stack.
    ///
    /// The bar keeps its position and length, so it can be started again.
    /// Stopping a bar that is not running does nothing.
    pub fn stop(&self) {
        if !self.started.swap(false, Ordering::SeqCst) {
            return;
        }
        self.bar.set_draw_target(ProgressDrawTarget::hidden());
        self.console.set_live_display(None);
        self.console.resume_stack();
        self.console.set_live(false);
    }

    /// Whether the bar is currently running.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Sets the total number of steps, switching the bar to determinate mode.
    pub fn set_length(&self, length: u64) {
        self.bar.set_length(length);
        if !self.determinate.swap(true, Ordering::SeqCst) {
            self.bar
                .set_style(bar_style(self.console.theme(), self.download, true));
        }
    }

    /// Moves the bar to an absolute position.
    pub fn set_position(&self, position: u64) {
        self.bar.set_position(position);
    }

    /// Advances the bar by `delta` steps.
    pub fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    /// Replaces the description next to the glyph; markup is rendered.
    pub fn set_description(&self, description: &str) {
        self.bar.set_message(self.console.render_str(description));
    }

    /// Current position of the bar.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total number of steps, if a length has been set.
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.stop();
    }
}
