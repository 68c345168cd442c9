//! Style aliases and markup rendering.
//!
//! A [`Theme`] maps style aliases to terminal styles and understands a small
//! markup syntax where spans are wrapped in named tags:
//!
//! ```text
//! [error]something went wrong[/error]
//! ```
//!
//! Tag names resolve through the alias table, then through
//! [`console::Style::from_dotted_str`], so both aliases (`error`) and raw
//! style words (`bold red`) work. Text without a matching opening/closing
//! pair is left untouched, which keeps literal brackets like `[i]` safe
//! without an escaping syntax.

use crate::strings;
use console::Style;
use std::collections::{HashMap, HashSet};

/// Mapping of style aliases to terminal styles.
///
/// Aliases resolve transitively: an alias may point at another alias, and a
/// multi-word style resolves word by word. Lookup is cycle-safe, a word that
/// resolves back to itself is emitted literally.
///
/// [`Theme::default`] ships the aliases used by the crate's own output;
/// [`Theme::new`] starts empty.
///
/// # Examples
///
/// ```rust
/// use banter::Theme;
///
/// let theme = Theme::new()
///     .add("alert", "bold red")
///     .add("fatal", "alert underlined");
/// assert_eq!(theme.resolve("fatal"), "bold red underlined");
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    aliases: HashMap<String, String>,
}

impl Default for Theme {
    fn default() -> Self {
        let pairs = [
            ("logging.level.error", "bold red"),
            ("logging.level.warn", "yellow"),
            ("logging.level.info", "blue"),
            ("logging.level.debug", "green"),
            ("logging.level.trace", "dim"),
            ("progress.description", "cyan"),
            ("progress.percentage", "magenta"),
            ("progress.elapsed", "yellow"),
            ("progress.remaining", "cyan"),
            ("color.black", "black"),
            ("error", "logging.level.error"),
            ("warning", "logging.level.warn"),
            ("warn", "logging.level.warn"),
            ("info", "logging.level.info"),
            ("debug", "logging.level.debug"),
        ];
        let mut theme = Theme::new();
        for (alias, style) in pairs {
            theme.aliases.insert(alias.to_string(), style.to_string());
        }
        theme
    }
}

impl Theme {
    /// Creates an empty theme with no aliases.
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Adds an alias, replacing any previous definition.
    pub fn add(mut self, alias: impl Into<String>, style: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), style.into());
        self
    }

    /// Returns the direct definition of an alias, without resolving further.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Resolves a style expression to its final style words.
    ///
    /// Each whitespace-separated word is looked up in the alias table and
    /// replaced by its resolved definition; unknown words pass through
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use banter::Theme;
    ///
    /// let theme = Theme::default();
    /// assert_eq!(theme.resolve("error"), "bold red");
    /// assert_eq!(theme.resolve("bold magenta"), "bold magenta");
    /// ```
    pub fn resolve(&self, style: &str) -> String {
        let mut seen = HashSet::new();
        self.resolve_with(style, &mut seen)
    }

    fn resolve_with(&self, style: &str, seen: &mut HashSet<String>) -> String {
        let mut resolved: Vec<String> = Vec::new();
        for word in style.split_whitespace() {
            match self.aliases.get(word) {
                Some(target) if !seen.contains(word) => {
                    seen.insert(word.to_string());
                    resolved.push(self.resolve_with(target, seen));
                    seen.remove(word);
                }
                _ => resolved.push(word.to_string()),
            }
        }
        resolved.join(" ")
    }

    /// Wraps a value in the opening and closing tags of a resolved style.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use banter::Theme;
    ///
    /// let theme = Theme::default();
    /// assert_eq!(theme.stylize("boom", "error"), "[bold red]boom[/bold red]");
    /// ```
    pub fn stylize(&self, value: &str, style: &str) -> String {
        let style = self.resolve(style);
        format!("[{style}]{value}[/{style}]")
    }

    /// Rewrites every paired tag in a markup string to its resolved form.
    ///
    /// The text in between is preserved, including nested tags, and unpaired
    /// tags or stray brackets are left exactly as written.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use banter::Theme;
    ///
    /// let theme = Theme::default();
    /// assert_eq!(
    ///     theme.resolve_styles("[error]boom[/error] at [info]startup[/info]"),
    ///     "[bold red]boom[/bold red] at [blue]startup[/blue]"
    /// );
    /// assert_eq!(theme.resolve_styles("array[i] stays"), "array[i] stays");
    /// ```
    pub fn resolve_styles(&self, text: &str) -> String {
        let mut out = String::new();
        self.write_resolved(&parse_markup(text), &mut out);
        out
    }

    fn write_resolved(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Tag { name, children } => {
                    let resolved = self.resolve(name);
                    out.push('[');
                    out.push_str(&resolved);
                    out.push(']');
                    self.write_resolved(children, out);
                    out.push_str("[/");
                    out.push_str(&resolved);
                    out.push(']');
                }
            }
        }
    }

    /// Renders a markup string to terminal text.
    ///
    /// Paired tags are resolved and applied as ANSI styles, nested tags
    /// combine with their ancestors, and everything else is copied through
    /// verbatim. Whether styles produce escape codes follows the `console`
    /// crate's color detection.
    pub fn render(&self, text: &str) -> String {
        let mut out = String::new();
        self.write_rendered(&parse_markup(text), &[], &mut out);
        out
    }

    fn write_rendered(&self, nodes: &[Node], active: &[String], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => {
                    if active.is_empty() {
                        out.push_str(text);
                    } else {
                        let style = Style::from_dotted_str(&active.join("."));
                        out.push_str(&style.apply_to(text).to_string());
                    }
                }
                Node::Tag { name, children } => {
                    let mut styles = active.to_vec();
                    styles.extend(self.resolve(name).split_whitespace().map(String::from));
                    self.write_rendered(children, &styles, out);
                }
            }
        }
    }
}

/// A parsed piece of markup: literal text or a tag with its children.
#[derive(Debug)]
enum Node {
    Text(String),
    Tag { name: String, children: Vec<Node> },
}

/// Parses markup into a node tree.
///
/// An opening tag only becomes a tag node when a matching closing tag follows
/// it; otherwise it is kept as literal text. The first matching closing tag
/// wins, and the span in between is parsed recursively.
fn parse_markup(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;
    while cursor < text.len() {
        if text.as_bytes()[cursor] == b'[' {
            if let Some((name, body_start)) = strings::opening_tag_at(text, cursor) {
                let closing = format!("[/{name}]");
                if let Some(offset) = text[body_start..].find(&closing) {
                    let body_end = body_start + offset;
                    if literal_start < cursor {
                        nodes.push(Node::Text(text[literal_start..cursor].to_string()));
                    }
                    nodes.push(Node::Tag {
                        name,
                        children: parse_markup(&text[body_start..body_end]),
                    });
                    cursor = body_end + closing.len();
                    literal_start = cursor;
                    continue;
                }
            }
        }
        cursor += text[cursor..].chars().next().map_or(1, char::len_utf8);
    }
    if literal_start < text.len() {
        nodes.push(Node::Text(text[literal_start..].to_string()));
    }
    nodes
}

#[cfg(test)]
mod test {
    use super::*;

    fn tag<'a>(node: &'a Node) -> (&'a str, &'a [Node]) {
        match node {
            Node::Tag { name, children } => (name.as_str(), children.as_slice()),
            Node::Text(text) => panic!("expected a tag, got text {text:?}"),
        }
    }

    fn text(node: &Node) -> &str {
        match node {
            Node::Text(text) => text.as_str(),
            Node::Tag { name, .. } => panic!("expected text, got tag {name:?}"),
        }
    }

    #[test]
    fn parses_flat_pair() {
        let nodes = parse_markup("a [bold]b[/bold] c");
        assert_eq!(nodes.len(), 3);
        assert_eq!(text(&nodes[0]), "a ");
        let (name, children) = tag(&nodes[1]);
        assert_eq!(name, "bold");
        assert_eq!(text(&children[0]), "b");
        assert_eq!(text(&nodes[2]), " c");
    }

    #[test]
    fn parses_nested_pairs() {
        let nodes = parse_markup("[red]a[bold]b[/bold][/red]");
        let (name, children) = tag(&nodes[0]);
        assert_eq!(name, "red");
        assert_eq!(text(&children[0]), "a");
        let (inner, inner_children) = tag(&children[1]);
        assert_eq!(inner, "bold");
        assert_eq!(text(&inner_children[0]), "b");
    }

    #[test]
    fn parses_multi_word_tag() {
        let nodes = parse_markup("[bold red]x[/bold red]");
        let (name, _) = tag(&nodes[0]);
        assert_eq!(name, "bold red");
    }

    #[test]
    fn unpaired_tag_stays_literal() {
        let nodes = parse_markup("array[i] stays");
        assert_eq!(nodes.len(), 1);
        assert_eq!(text(&nodes[0]), "array[i] stays");
    }

    #[test]
    fn closing_without_opening_stays_literal() {
        let nodes = parse_markup("[/bold] tail");
        assert_eq!(nodes.len(), 1);
        assert_eq!(text(&nodes[0]), "[/bold] tail");
    }

    #[test]
    fn mismatched_names_stay_literal() {
        let nodes = parse_markup("[bold]a[/red]");
        assert_eq!(nodes.len(), 1);
        assert_eq!(text(&nodes[0]), "[bold]a[/red]");
    }

    #[test]
    fn empty_input_parses_to_nothing() {
        assert!(parse_markup("").is_empty());
    }
}
