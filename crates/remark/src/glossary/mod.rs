//! Glossary terms in prose become `<abbr>` elements carrying their definition.
//!
//! - `dictionary`: validated term list with case-insensitive lookup.
//! - `matcher`: the compiled longest-match-first pattern.
//! - `defaults`: the built-in term list.

pub mod defaults;
pub mod dictionary;
pub mod matcher;

pub use dictionary::{GlossaryTerm, TermDictionary};
pub use matcher::{GLOSSARY_CLASS, ScanContext, Span, TermMatcher, abbr_markup, escape_html};

use glossmark_core::{Ancestor, AstTransform, Node, NodeKind, Rewrite, splice_mut};
use std::sync::Arc;

/// Output elements whose text must not be annotated.
const PROTECTED_ELEMENTS: &[&str] = &["a", "abbr", "code"];

/// Scan context for text under `ancestors`.
pub fn scan_context(ancestors: &[Ancestor]) -> ScanContext {
    let protected = ancestors.iter().any(|ancestor| {
        matches!(
            ancestor.kind,
            NodeKind::Link | NodeKind::InlineCode | NodeKind::Code
        ) || ancestor
            .element
            .as_deref()
            .is_some_and(|element| PROTECTED_ELEMENTS.contains(&element))
    });
    if protected {
        ScanContext::Protected
    } else {
        ScanContext::Prose
    }
}

/// Replaces glossary terms in every text node with `<abbr>` markup.
///
/// Text inside links, code, or nodes rendered as `a`/`abbr`/`code` is left
/// alone. Generated markup is never scanned again.
pub fn remark_glossary(root: &mut Node, matcher: &TermMatcher) {
    let mut annotated = 0usize;
    splice_mut(root, &mut |node, ancestors| match node {
        Node::Text(text) => match matcher.annotate(&text.value, scan_context(ancestors)) {
            Some(nodes) => {
                annotated += 1;
                Rewrite::Replace(nodes)
            }
            None => Rewrite::Keep(Node::Text(text)),
        },
        other => Rewrite::Keep(other),
    });
    if annotated > 0 {
        log::debug!("Annotated glossary terms in {annotated} text nodes");
    }
}

/// Pipeline pass wrapping [`remark_glossary`].
#[derive(Debug, Clone)]
pub struct GlossaryPass {
    matcher: Arc<TermMatcher>,
}

impl GlossaryPass {
    pub fn new(matcher: Arc<TermMatcher>) -> Self {
        Self { matcher }
    }
}

impl AstTransform for GlossaryPass {
    fn transform(&self, root: &mut Node) {
        remark_glossary(root, &self.matcher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossmark_core::RenderHint;

    fn matcher() -> TermMatcher {
        let dict = TermDictionary::new(vec![
            GlossaryTerm::new("REV", "REV Robotics"),
            GlossaryTerm::new("PC", "Polycarbonate"),
        ])
        .unwrap();
        TermMatcher::new(dict).unwrap()
    }

    fn html_values(node: &Node, out: &mut Vec<String>) {
        if let Node::Html(html) = node {
            out.push(html.value.clone());
        }
        for child in node.children() {
            html_values(child, out);
        }
    }

    #[test]
    fn annotates_prose_and_splices_in_place() {
        let mut root = Node::root(vec![Node::paragraph(vec![
            Node::text("Buy REV parts"),
            Node::emphasis(vec![Node::text("and PC")]),
        ])]);
        remark_glossary(&mut root, &matcher());

        let para = &root.children()[0];
        assert_eq!(para.children().len(), 4);
        assert_eq!(para.children()[0], Node::text("Buy "));
        assert_eq!(para.children()[2], Node::text(" parts"));
        let mut markup = Vec::new();
        html_values(&root, &mut markup);
        assert_eq!(
            markup,
            vec![
                "<abbr class=\"glossary-term\" title=\"REV Robotics\">REV</abbr>",
                "<abbr class=\"glossary-term\" title=\"Polycarbonate\">PC</abbr>",
            ]
        );
    }

    #[test]
    fn skips_links_and_code() {
        let mut root = Node::root(vec![Node::paragraph(vec![
            Node::link("https://www.revrobotics.com", vec![Node::emphasis(vec![Node::text("REV")])]),
            Node::inline_code("PC"),
        ])]);
        let before = root.clone();
        remark_glossary(&mut root, &matcher());
        assert_eq!(root, before);
    }

    #[test]
    fn skips_nodes_rendered_as_protected_elements() {
        let mut para = Node::paragraph(vec![Node::text("REV")]);
        para.set_hint(Some(RenderHint::element("abbr")));
        let mut root = Node::root(vec![para]);
        let before = root.clone();
        remark_glossary(&mut root, &matcher());
        assert_eq!(root, before);
    }

    #[test]
    fn running_twice_does_not_nest_markup() {
        let mut root = Node::root(vec![Node::paragraph(vec![Node::text("REV and PC")])]);
        let m = matcher();
        remark_glossary(&mut root, &m);
        let once = root.clone();
        remark_glossary(&mut root, &m);
        assert_eq!(root, once);
    }

    #[test]
    fn scan_context_from_ancestors() {
        let prose = [Ancestor {
            kind: NodeKind::Paragraph,
            element: Some("figcaption".into()),
        }];
        assert_eq!(scan_context(&prose), ScanContext::Prose);

        let linked = [
            Ancestor {
                kind: NodeKind::Paragraph,
                element: None,
            },
            Ancestor {
                kind: NodeKind::Link,
                element: None,
            },
        ];
        assert_eq!(scan_context(&linked), ScanContext::Protected);
    }
}
