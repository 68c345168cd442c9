//! Utilities for preparing text before it reaches the terminal.
//!
//! This module groups the small string helpers used across the crate:
//! indentation normalization for multi-line messages, list joining for
//! human-readable enumerations, and inspection of the style tags understood by
//! [`Theme`](crate::theme::Theme).

use regex::Regex;
use std::sync::OnceLock;

static OPENING_TAG: OnceLock<Regex> = OnceLock::new();

/// Matches an opening style tag such as `[bold]`, `[bold red]` or
/// `[logging.level.info]`.
///
/// A tag name is one or more words made of word characters and dots, separated
/// by single spaces. Closing tags (`[/...]`) never match because `/` is not a
/// word character.
fn opening_tag() -> &'static Regex {
    OPENING_TAG.get_or_init(|| Regex::new(r"\[([\w.]+(?:\s+[\w.]+)*)\]").unwrap())
}

/// Returns the opening tag starting exactly at byte offset `at`, if any,
/// along with the offset of the first byte after the closing bracket.
pub(crate) fn opening_tag_at(text: &str, at: usize) -> Option<(String, usize)> {
    let caps = opening_tag().captures_at(text, at)?;
    let whole = caps.get(0)?;
    if whole.start() != at {
        return None;
    }
    Some((caps.get(1)?.as_str().to_string(), whole.end()))
}

/// Normalizes the indentation of a multi-line message.
///
/// The first line keeps its content as written while the remaining lines are
/// shifted left by the smallest indentation found among them, preserving their
/// relative nesting. Whitespace-only lines are ignored when measuring and come
/// out empty. Leading and trailing whitespace of the final text is trimmed,
/// so the function is idempotent: applying it twice yields the same result as
/// applying it once.
///
/// This makes messages written as indented string literals inside nested code
/// blocks display flush-left on the terminal.
///
/// # Arguments
///
/// * `text` - The message to normalize.
///
/// # Examples
///
/// ```rust
/// use banter::normalize_indent;
///
/// let message = "Download failed:
///         cause: connection reset
///             retry in: 3s";
/// assert_eq!(
///     normalize_indent(message),
///     "Download failed:\ncause: connection reset\n    retry in: 3s"
/// );
/// assert_eq!(normalize_indent("   hello   "), "hello");
/// ```
pub fn normalize_indent(text: &str) -> String {
    if !text.trim().contains('\n') {
        return text.trim().to_string();
    }
    let margin = text
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min()
        .unwrap_or(0);
    let mut lines = text.lines();
    let mut normalized: Vec<&str> = Vec::new();
    if let Some(first) = lines.next() {
        normalized.push(first);
    }
    for line in lines {
        if line.trim().is_empty() {
            normalized.push("");
        } else {
            normalized.push(strip_whitespace(line, margin));
        }
    }
    normalized.join("\n").trim().to_string()
}

/// Counts the whitespace characters at the start of a line.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Removes up to `count` leading whitespace characters from a line.
fn strip_whitespace(line: &str, count: usize) -> &str {
    let mut rest = line;
    let mut remaining = count;
    while remaining > 0 {
        match rest.chars().next() {
            Some(c) if c.is_whitespace() => {
                rest = &rest[c.len_utf8()..];
                remaining -= 1;
            }
            _ => break,
        }
    }
    rest
}

/// Joins parts with commas, optionally using a different delimiter before the
/// last part.
///
/// An empty slice yields an empty string and a single part is returned as-is.
/// With `last_delimiter` set, the final two parts are joined by it instead of
/// a comma, producing natural enumerations such as `a, b or c`.
///
/// # Arguments
///
/// * `parts` - The parts to join.
/// * `last_delimiter` - Optional word inserted before the last part.
///
/// # Examples
///
/// ```rust
/// use banter::join;
///
/// assert_eq!(join(&["a", "b", "c"], None), "a, b, c");
/// assert_eq!(join(&["a", "b", "c"], Some("or")), "a, b or c");
/// assert_eq!(join(&["a"], Some("and")), "a");
/// ```
pub fn join<S: AsRef<str>>(parts: &[S], last_delimiter: Option<&str>) -> String {
    let parts: Vec<&str> = parts.iter().map(AsRef::as_ref).collect();
    match (parts.as_slice(), last_delimiter) {
        ([], _) => String::new(),
        ([only], _) => (*only).to_string(),
        (_, None) => parts.join(", "),
        (_, Some(delimiter)) => format!(
            "{} {} {}",
            parts[..parts.len() - 1].join(", "),
            delimiter,
            parts[parts.len() - 1]
        ),
    }
}

/// Joins parts with commas and `and` before the last part.
///
/// # Examples
///
/// ```rust
/// use banter::join_and;
///
/// assert_eq!(join_and(&["one", "two", "three"]), "one, two and three");
/// ```
pub fn join_and<S: AsRef<str>>(parts: &[S]) -> String {
    join(parts, Some("and"))
}

/// Joins parts with commas and `or` before the last part.
///
/// # Examples
///
/// ```rust
/// use banter::join_or;
///
/// assert_eq!(join_or(&["one", "two"]), "one or two");
/// ```
pub fn join_or<S: AsRef<str>>(parts: &[S]) -> String {
    join(parts, Some("or"))
}

/// Joins parts as a bullet list, one part per line.
///
/// # Examples
///
/// ```rust
/// use banter::join_bullet;
///
/// assert_eq!(join_bullet(&["first", "second"]), "• first\n• second");
/// assert_eq!(join_bullet::<&str>(&[]), "");
/// ```
pub fn join_bullet<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| format!("\n• {}", part.as_ref()))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lists the opening style tags found in a markup string, in order of
/// appearance.
///
/// Duplicates are preserved, one entry per opening tag, so the result mirrors
/// the structure of the text rather than the set of styles it uses. Closing
/// tags are not reported.
///
/// # Arguments
///
/// * `text` - The markup text to inspect.
///
/// # Examples
///
/// ```rust
/// use banter::list_styles;
///
/// let styles = list_styles("[bold]a[/bold] [red]b[/red] [bold]c[/bold]");
/// assert_eq!(styles, vec!["bold", "red", "bold"]);
/// assert!(list_styles("no tags here").is_empty());
/// ```
pub fn list_styles(text: &str) -> Vec<String> {
    opening_tag()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
