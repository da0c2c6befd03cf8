//! Longest-match-first, whole-word, case-insensitive term matching.

use super::dictionary::TermDictionary;
use crate::error::GlossaryError;
use glossmark_core::Node;
use regex::Regex;

/// Class on generated `<abbr>` elements.
pub const GLOSSARY_CLASS: &str = "glossary-term";

/// Where the text being scanned sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanContext {
    /// Ordinary prose: annotate.
    Prose,
    /// Inside a link, code, or an existing annotation: leave unchanged.
    Protected,
}

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Text with no term in it.
    Literal(&'a str),
    /// A matched term as written in the source, with its definition.
    Term {
        surface: &'a str,
        definition: &'a str,
    },
}

impl<'a> Span<'a> {
    /// The source text this span covers.
    pub fn surface(&self) -> &'a str {
        match self {
            Span::Literal(text) => text,
            Span::Term { surface, .. } => surface,
        }
    }
}

/// A dictionary compiled into a single alternation pattern.
///
/// Terms are ordered by descending length before compiling, so at any
/// position the longest term wins. Shared read-only across documents.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    dictionary: TermDictionary,
    /// `None` for an empty dictionary.
    pattern: Option<Regex>,
}

impl TermMatcher {
    pub fn new(dictionary: TermDictionary) -> Result<Self, GlossaryError> {
        let pattern = compile_pattern(&dictionary)?;
        Ok(Self {
            dictionary,
            pattern,
        })
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    /// Splits `text` into literal and term spans, left to right, without overlap.
    ///
    /// Protected text, text without matches and an empty dictionary all yield
    /// a single literal span (none for empty text).
    pub fn spans<'a>(&'a self, text: &'a str, context: ScanContext) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        let pattern = match (&self.pattern, context) {
            (Some(pattern), ScanContext::Prose) => pattern,
            _ => {
                if !text.is_empty() {
                    spans.push(Span::Literal(text));
                }
                return spans;
            }
        };

        let mut last = 0;
        for found in pattern.find_iter(text) {
            if found.start() > last {
                spans.push(Span::Literal(&text[last..found.start()]));
            }
            let surface = found.as_str();
            spans.push(Span::Term {
                surface,
                definition: self.dictionary.lookup(surface).unwrap_or_default(),
            });
            last = found.end();
        }
        if last < text.len() {
            spans.push(Span::Literal(&text[last..]));
        }
        spans
    }

    /// Replacement nodes for a text node, or `None` when nothing matched.
    ///
    /// Literal spans become text nodes and terms become raw `<abbr>` markup.
    pub fn annotate(&self, text: &str, context: ScanContext) -> Option<Vec<Node>> {
        let spans = self.spans(text, context);
        if !spans.iter().any(|span| matches!(span, Span::Term { .. })) {
            return None;
        }
        Some(
            spans
                .into_iter()
                .map(|span| match span {
                    Span::Literal(text) => Node::text(text),
                    Span::Term {
                        surface,
                        definition,
                    } => Node::html(abbr_markup(surface, definition)),
                })
                .collect(),
        )
    }
}

/// `<abbr>` markup for one matched term.
pub fn abbr_markup(surface: &str, definition: &str) -> String {
    format!(
        "<abbr class=\"{GLOSSARY_CLASS}\" title=\"{}\">{}</abbr>",
        escape_html(definition),
        escape_html(surface)
    )
}

/// Escapes `& < > " '` for text spliced into raw markup.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

fn compile_pattern(dictionary: &TermDictionary) -> Result<Option<Regex>, GlossaryError> {
    if dictionary.is_empty() {
        return Ok(None);
    }

    let mut terms: Vec<&str> = dictionary
        .entries()
        .iter()
        .map(|entry| entry.term.as_str())
        .collect();
    // Stable: equal lengths keep declaration order.
    terms.sort_by_key(|term| std::cmp::Reverse(term.chars().count()));

    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    let source = format!(r"(?i)\b(?:{alternation})\b");
    log::trace!("Compiled glossary pattern over {} terms", terms.len());
    Ok(Some(Regex::new(&source)?))
}
