//! `:::figure` blocks become `<figure>` with images hoisted above a `<figcaption>`.
//!
//! ```text
//! :::figure{w=80 border}
//! ![Drivetrain](./img/drive.webp)
//! Tank drive with a dropped center
//! :::
//! ```

use crate::attributes::{DEFAULT_BORDER, Width, border_from};
use glossmark_core::{Attributes, AstTransform, Node, Parent, RenderHint, visit_mut};

/// Class on every rewritten figure.
pub const FIGURE_CLASS: &str = "md-figure";
/// Extra class when the figure has a border.
pub const FIGURE_BORDER_CLASS: &str = "md-figure-border";
/// Class on generated captions.
pub const FIGCAPTION_CLASS: &str = "md-figcaption";

/// Presentation attributes read from a figure directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureAttributes {
    pub width: Option<Width>,
    pub border: Option<String>,
}

impl FigureAttributes {
    pub fn from_directive(attrs: &Attributes, default_border: &str) -> Self {
        Self {
            width: Width::from_attributes(attrs),
            border: border_from(attrs, default_border),
        }
    }

    /// Builds the figure's render hint.
    pub fn hint(&self) -> RenderHint {
        let mut class = FIGURE_CLASS.to_string();
        if self.border.is_some() {
            class.push(' ');
            class.push_str(FIGURE_BORDER_CLASS);
        }

        let mut style = Vec::new();
        if let Some(width) = &self.width {
            style.push(format!("width: {};", width.css()));
        }
        if let Some(border) = &self.border {
            style.push(format!("--figure-border: {border};"));
        }

        let mut hint = RenderHint::element("figure").with_property("class", class);
        if !style.is_empty() {
            hint.set_property("style", style.join(" "));
        }
        hint
    }
}

/// Rewrites every `figure` directive with the default border.
pub fn remark_figure(root: &mut Node) {
    remark_figure_with(root, DEFAULT_BORDER);
}

/// Rewrites every `figure` directive.
///
/// Each immediate paragraph child is split into an image paragraph (keeping
/// the source paragraph's hint) followed by a `figcaption` paragraph holding
/// the remaining inline content. Whitespace-only text at the edges of the
/// caption is dropped and empty groups are not emitted. Other children keep their position.
pub fn remark_figure_with(root: &mut Node, default_border: &str) {
    visit_mut(root, &mut |node| {
        let Node::ContainerDirective(directive) = node else {
            return;
        };
        if directive.name != "figure" {
            return;
        }

        let attrs = FigureAttributes::from_directive(&directive.attributes, default_border);
        let mut hint = directive.hint.take().unwrap_or_default();
        let figure = attrs.hint();
        hint.element = figure.element;
        hint.properties.extend(figure.properties);
        directive.hint = Some(hint);

        let children = std::mem::take(&mut directive.children);
        directive.children = split_figure_children(children);
        log::debug!(
            "Rewrote :::figure directive into {} children",
            directive.children.len()
        );
    });
}

fn split_figure_children(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len() + 1);
    for child in children {
        let Node::Paragraph(paragraph) = child else {
            out.push(child);
            continue;
        };

        let (images, mut caption): (Vec<Node>, Vec<Node>) = paragraph
            .children
            .into_iter()
            .partition(|node| matches!(node, Node::Image(_)));
        trim_blank_edges(&mut caption);

        if !images.is_empty() {
            out.push(Node::Paragraph(Parent {
                children: images,
                hint: paragraph.hint,
            }));
        }
        if !caption.is_empty() {
            out.push(Node::Paragraph(Parent {
                children: caption,
                hint: Some(
                    RenderHint::element("figcaption").with_property("class", FIGCAPTION_CLASS),
                ),
            }));
        }
    }
    out
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.value.trim().is_empty())
}

/// Drops whitespace-only text at either end; inner spacing is kept.
fn trim_blank_edges(nodes: &mut Vec<Node>) {
    let leading = nodes.iter().take_while(|node| is_blank_text(node)).count();
    nodes.drain(..leading);
    while nodes.last().is_some_and(is_blank_text) {
        nodes.pop();
    }
}

/// Pipeline pass wrapping [`remark_figure_with`].
#[derive(Debug, Clone)]
pub struct FigurePass {
    pub default_border: String,
}

impl Default for FigurePass {
    fn default() -> Self {
        Self {
            default_border: DEFAULT_BORDER.to_string(),
        }
    }
}

impl AstTransform for FigurePass {
    fn transform(&self, root: &mut Node) {
        remark_figure_with(root, &self.default_border);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossmark_core::NodeKind;

    fn figure(attrs: &[(&str, &str)], children: Vec<Node>) -> Node {
        let attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Node::root(vec![Node::directive("figure", attrs, children)])
    }

    fn rewritten(mut root: Node) -> Node {
        remark_figure(&mut root);
        root.children()[0].clone()
    }

    fn element(node: &Node) -> Option<&str> {
        node.hint().and_then(|hint| hint.element.as_deref())
    }

    #[test]
    fn image_and_caption_are_split() {
        let fig = rewritten(figure(
            &[],
            vec![Node::paragraph(vec![
                Node::image("./img/a.webp", "A"),
                Node::text("Caption"),
            ])],
        ));

        let hint = fig.hint().unwrap();
        assert_eq!(hint.element.as_deref(), Some("figure"));
        assert_eq!(hint.class(), Some("md-figure"));
        assert_eq!(hint.style(), None);

        let children = fig.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].children().len(), 1);
        assert_eq!(children[0].children()[0].kind(), NodeKind::Image);
        assert_eq!(element(&children[0]), None);
        assert_eq!(element(&children[1]), Some("figcaption"));
        assert_eq!(children[1].hint().unwrap().class(), Some(FIGCAPTION_CLASS));
        assert_eq!(children[1].text_content(), "Caption");
    }

    #[test]
    fn image_only_has_no_caption() {
        let fig = rewritten(figure(
            &[],
            vec![Node::paragraph(vec![Node::image("a.png", ""), Node::text("  \n")])],
        ));
        assert_eq!(fig.children().len(), 1);
        assert_eq!(element(&fig.children()[0]), None);
    }

    #[test]
    fn caption_keeps_inner_spacing() {
        let fig = rewritten(figure(
            &[],
            vec![Node::paragraph(vec![
                Node::image("a.png", ""),
                Node::text("\n"),
                Node::strong(vec![Node::text("Left")]),
                Node::text(" "),
                Node::emphasis(vec![Node::text("right")]),
                Node::text(" \n"),
            ])],
        ));
        let caption = &fig.children()[1];
        assert_eq!(caption.children().len(), 3);
        assert_eq!(caption.children()[1], Node::text(" "));
        assert_eq!(caption.text_content(), "Left right");
    }

    #[test]
    fn text_only_has_no_image_group() {
        let fig = rewritten(figure(&[], vec![Node::paragraph(vec![Node::text("Only words")])]));
        assert_eq!(fig.children().len(), 1);
        assert_eq!(element(&fig.children()[0]), Some("figcaption"));
    }

    #[test]
    fn images_hoisted_before_caption_and_inline_nodes_kept() {
        let fig = rewritten(figure(
            &[],
            vec![Node::paragraph(vec![
                Node::text("Left "),
                Node::image("a.png", ""),
                Node::strong(vec![Node::text("bold")]),
                Node::image("b.png", ""),
            ])],
        ));
        let children = fig.children();
        assert_eq!(children.len(), 2);
        let urls: Vec<&str> = children[0]
            .children()
            .iter()
            .filter_map(|n| match n {
                Node::Image(i) => Some(i.url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(urls, vec!["a.png", "b.png"]);
        assert_eq!(children[1].children().len(), 2);
        assert_eq!(children[1].text_content(), "Left bold");
    }

    #[test]
    fn multiple_paragraphs_and_passthrough_keep_order() {
        let fig = rewritten(figure(
            &[],
            vec![
                Node::paragraph(vec![Node::image("a.png", ""), Node::text("First")]),
                Node::html("<hr>"),
                Node::paragraph(vec![Node::image("b.png", ""), Node::text("Second")]),
            ],
        ));
        let children = fig.children();
        assert_eq!(children.len(), 5);
        assert_eq!(element(&children[1]), Some("figcaption"));
        assert_eq!(children[2].kind(), NodeKind::Html);
        assert_eq!(children[4].text_content(), "Second");
    }

    #[test]
    fn width_and_default_border_style() {
        let fig = rewritten(figure(&[("w", "80"), ("border", "")], vec![]));
        let hint = fig.hint().unwrap();
        assert_eq!(hint.class(), Some("md-figure md-figure-border"));
        assert_eq!(
            hint.style(),
            Some("width: 80%; --figure-border: 5px solid #ADADAD;")
        );
        assert!(fig.children().is_empty());
    }

    #[test]
    fn raw_width_wins_and_border_decoded() {
        let fig = rewritten(figure(
            &[("w", "80"), ("width", "20rem"), ("border", "2px_dashed_#333")],
            vec![],
        ));
        assert_eq!(
            fig.hint().unwrap().style(),
            Some("width: 20rem; --figure-border: 2px dashed #333;")
        );
    }

    #[test]
    fn image_paragraph_keeps_source_hint() {
        let mut para = Node::paragraph(vec![Node::image("a.png", "")]);
        para.hint_mut().set_property("id", "p1");
        let fig = rewritten(figure(&[], vec![para]));
        assert_eq!(fig.children()[0].hint().unwrap().property("id"), Some("p1"));
    }

    #[test]
    fn other_directives_untouched() {
        let mut root = Node::root(vec![Node::directive(
            "center",
            Attributes::new(),
            vec![Node::paragraph(vec![Node::image("a.png", ""), Node::text("x")])],
        )]);
        let before = root.clone();
        remark_figure(&mut root);
        assert_eq!(root, before);
    }
}
