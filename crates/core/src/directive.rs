//! Container directive line syntax: `:::name[label]{#id .class key=value}`.
//!
//! markdown-rs has no directive construct, so the tree producer recognises
//! opener and closer lines itself and hands the body back to markdown-rs.

use crate::tree::Attributes;

/// Parsed opener line of a container directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOpening {
    /// Directive name, case preserved.
    pub name: String,
    /// Text between `[` and `]`, if present.
    pub label: Option<String>,
    /// Parsed `{...}` attribute block.
    pub attributes: Attributes,
    /// Number of colons in the opener; the closer needs at least as many.
    pub fence_len: usize,
}

/// Parses a container directive opener such as `:::figure{w=80 border}`.
///
/// Returns `None` for anything else, including `:::` closers, indented code
/// (4+ leading spaces) and openers followed by trailing text.
pub fn parse_directive_opening(line: &str) -> Option<DirectiveOpening> {
    let rest = strip_indent(line)?;
    let fence_len = rest.chars().take_while(|c| *c == ':').count();
    if fence_len < 3 {
        return None;
    }
    let rest = &rest[fence_len..];

    let name_len = rest
        .char_indices()
        .find(|&(i, c)| {
            if i == 0 {
                !c.is_ascii_alphabetic()
            } else {
                !(c.is_ascii_alphanumeric() || c == '-' || c == '_')
            }
        })
        .map_or(rest.len(), |(i, _)| i);
    if name_len == 0 {
        return None;
    }
    let name = rest[..name_len].to_string();
    let mut rest = &rest[name_len..];

    let mut label = None;
    if let Some(after) = rest.strip_prefix('[') {
        let end = after.find(']')?;
        label = Some(after[..end].to_string());
        rest = &after[end + 1..];
    }

    let mut attributes = Attributes::new();
    if let Some(after) = rest.strip_prefix('{') {
        let end = closing_brace(after)?;
        attributes = parse_attributes(&after[..end]);
        rest = &after[end + 1..];
    }

    if !rest.trim().is_empty() {
        return None;
    }

    Some(DirectiveOpening {
        name,
        label,
        attributes,
        fence_len,
    })
}

/// Returns the colon count when `line` is a bare closer (`:::`, `::::`, ...).
pub fn directive_closer_len(line: &str) -> Option<usize> {
    let rest = strip_indent(line)?.trim_end();
    let len = rest.chars().take_while(|c| *c == ':').count();
    (len >= 3 && len == rest.len()).then_some(len)
}

/// Parses the inside of a `{...}` attribute block.
///
/// `#id` sets `id`, `.name` accumulates into `class`, `key=value` (optionally
/// quoted) sets `key`, and a bare `key` sets it to the empty string. Later
/// keys overwrite earlier ones.
pub fn parse_attributes(raw: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut classes: Vec<&str> = Vec::new();
    let mut rest = raw.trim_start();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('#') {
            let (id, tail) = split_shorthand(after);
            if !id.is_empty() {
                attrs.insert("id".to_string(), id.to_string());
            }
            rest = tail;
        } else if let Some(after) = rest.strip_prefix('.') {
            let (class, tail) = split_shorthand(after);
            if !class.is_empty() {
                classes.push(class);
            }
            rest = tail;
        } else {
            let key_len = rest
                .find(|c: char| c.is_whitespace() || matches!(c, '=' | '"' | '\'' | '#' | '.'))
                .unwrap_or(rest.len());
            if key_len == 0 {
                // Stray character (`=`, quote): skip it.
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            } else {
                let key = &rest[..key_len];
                let tail = &rest[key_len..];
                match tail.strip_prefix('=') {
                    Some(value_start) => {
                        let (value, tail) = split_value(value_start);
                        attrs.insert(key.to_string(), value.to_string());
                        rest = tail;
                    }
                    None => {
                        attrs.insert(key.to_string(), String::new());
                        rest = tail;
                    }
                }
            }
        }
        rest = rest.trim_start();
    }

    if !classes.is_empty() {
        attrs.insert("class".to_string(), classes.join(" "));
    }
    attrs
}

/// Strips up to three leading spaces; `None` when the line is indented code.
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 || line.starts_with('\t') {
        return None;
    }
    Some(&line[indent..])
}

/// Index of the `}` closing an attribute block, skipping quoted values.
fn closing_brace(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '}') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

fn split_shorthand(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    s.split_at(end)
}

fn split_value(s: &str) -> (&str, &str) {
    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let inner = &s[1..];
        return match inner.find(quote) {
            Some(end) => (&inner[..end], &inner[end + 1..]),
            None => (inner, ""),
        };
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    s.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_opener() {
        let opening = parse_directive_opening(":::center").unwrap();
        assert_eq!(opening.name, "center");
        assert_eq!(opening.label, None);
        assert!(opening.attributes.is_empty());
        assert_eq!(opening.fence_len, 3);
    }

    #[test]
    fn parses_label_and_attributes() {
        let opening = parse_directive_opening("::::figure[Robot]{w=80 border}  ").unwrap();
        assert_eq!(opening.name, "figure");
        assert_eq!(opening.label.as_deref(), Some("Robot"));
        assert_eq!(opening.attributes.get("w").map(String::as_str), Some("80"));
        assert_eq!(opening.attributes.get("border").map(String::as_str), Some(""));
        assert_eq!(opening.fence_len, 4);
    }

    #[test]
    fn rejects_non_openers() {
        assert!(parse_directive_opening(":::").is_none());
        assert!(parse_directive_opening("::center").is_none());
        assert!(parse_directive_opening("::: center").is_none());
        assert!(parse_directive_opening(":::1abc").is_none());
        assert!(parse_directive_opening("    :::center").is_none());
        assert!(parse_directive_opening(":::center trailing text").is_none());
        assert!(parse_directive_opening(":::figure{w=80").is_none());
    }

    #[test]
    fn recognises_closers() {
        assert_eq!(directive_closer_len(":::"), Some(3));
        assert_eq!(directive_closer_len("  :::::  "), Some(5));
        assert_eq!(directive_closer_len(":::note"), None);
        assert_eq!(directive_closer_len("::"), None);
    }

    #[test]
    fn attribute_shorthands_and_quotes() {
        let attrs = parse_attributes(r#"#hero .wide .dark title="A } B" border='2px_solid_red' w=50"#);
        assert_eq!(attrs.get("id").map(String::as_str), Some("hero"));
        assert_eq!(attrs.get("class").map(String::as_str), Some("wide dark"));
        assert_eq!(attrs.get("title").map(String::as_str), Some("A } B"));
        assert_eq!(attrs.get("border").map(String::as_str), Some("2px_solid_red"));
        assert_eq!(attrs.get("w").map(String::as_str), Some("50"));
    }

    #[test]
    fn quoted_brace_does_not_end_block() {
        let opening = parse_directive_opening(r#":::figure{title="a}b" w=10}"#).unwrap();
        assert_eq!(opening.attributes.get("title").map(String::as_str), Some("a}b"));
        assert_eq!(opening.attributes.get("w").map(String::as_str), Some("10"));
    }

    #[test]
    fn last_attribute_wins_and_stray_equals_skipped() {
        let attrs = parse_attributes("w=10 = w=20");
        assert_eq!(attrs.get("w").map(String::as_str), Some("20"));
        assert_eq!(attrs.len(), 1);
    }
}
