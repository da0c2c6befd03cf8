//! Image attributes encoded in the reference fragment.
//!
//! ```text
//! ![Alt](./img/image.webp#w=80)            width 80%
//! ![Alt](./img/image.webp#w=60&border)     width 60%, default border
//! ![Alt](./img/image.webp#border=2px_solid_red)
//! ![Alt](./img/image.webp#align=left)
//! ```
//!
//! The fragment is stripped from the url. The image gets an inline style and
//! `data-slide-*` attributes for the slides component; its paragraph becomes
//! an aligned `div` wrapper.

use crate::attributes::{Alignment, DEFAULT_BORDER, Width, parse_fragment, split_reference};
use glossmark_core::{AstTransform, Image, Node, Parent, visit_mut};

/// Width applied when the fragment names none.
const FULL_WIDTH: &str = "100%";

/// Presentation attributes decoded from an image fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttributes {
    /// Explicit alignment, if a recognised one was given.
    pub align: Option<Alignment>,
    pub width: Option<Width>,
    /// Decoded border; empty values are treated as absent.
    pub border: Option<String>,
}

impl ImageAttributes {
    /// Parses the text after `#` in an image reference.
    pub fn parse(fragment: &str, default_border: &str) -> Self {
        let attrs = parse_fragment(fragment, default_border);
        let align = attrs.get("align").and_then(|value| {
            let parsed = Alignment::parse(value);
            if parsed.is_none() {
                log::debug!("Ignoring unknown image alignment {value:?}");
            }
            parsed
        });
        Self {
            align,
            width: Width::from_attributes(&attrs),
            border: attrs.get("border").filter(|b| !b.is_empty()).cloned(),
        }
    }

    /// Wrapper alignment, defaulting to center.
    pub fn alignment(&self) -> Alignment {
        self.align.unwrap_or_default()
    }

    fn apply(&self, image: &mut Image) {
        let width = self
            .width
            .as_ref()
            .map_or_else(|| FULL_WIDTH.to_string(), Width::css);
        let mut style = format!("width: {width};");
        if let Some(border) = &self.border {
            style.push_str(&format!(" border: {border};"));
        }

        let hint = image.hint.get_or_insert_with(Default::default);
        hint.set_property("style", style);
        if let Some(Width::Percent(percent)) = &self.width {
            hint.set_property("data-slide-width", percent.as_str());
        }
        if let Some(border) = &self.border {
            hint.set_property("data-slide-border", border.as_str());
        }
        if let Some(align) = self.align {
            hint.set_property("data-slide-align", align.as_str());
        }
    }
}

/// Class list for an image wrapper.
pub fn wrapper_class(align: Alignment) -> String {
    format!("img-wrapper img-align-{}", align.as_str())
}

/// Applies image fragments with the default border.
pub fn remark_image_attributes(root: &mut Node) {
    remark_image_attributes_with(root, DEFAULT_BORDER);
}

/// Applies image fragments in every paragraph.
///
/// A paragraph whose only child is a plain image is still wrapped and
/// centered. Siblings of the image are never touched.
pub fn remark_image_attributes_with(root: &mut Node, default_border: &str) {
    visit_mut(root, &mut |node| {
        if let Node::Paragraph(paragraph) = node {
            rewrite_paragraph(paragraph, default_border);
        }
    });
}

fn rewrite_paragraph(paragraph: &mut Parent, default_border: &str) {
    let only_child = paragraph.children.len() == 1;
    let mut wrapper = None;

    for child in paragraph.children.iter_mut() {
        let Node::Image(image) = child else {
            continue;
        };
        let parsed = split_reference(&image.url).map(|(url, fragment)| {
            (url.to_string(), ImageAttributes::parse(fragment, default_border))
        });
        match parsed {
            Some((url, attrs)) => {
                image.url = url;
                attrs.apply(image);
                wrapper = Some(attrs.alignment());
                log::debug!("Applied image attributes to {}", image.url);
            }
            None if only_child => wrapper = Some(Alignment::Center),
            None => {}
        }
    }

    if let Some(align) = wrapper {
        let hint = paragraph.hint.get_or_insert_with(Default::default);
        hint.set_element("div");
        hint.set_property("class", wrapper_class(align));
    }
}

/// Pipeline pass wrapping [`remark_image_attributes_with`].
#[derive(Debug, Clone)]
pub struct ImageAttributesPass {
    pub default_border: String,
}

impl Default for ImageAttributesPass {
    fn default() -> Self {
        Self {
            default_border: DEFAULT_BORDER.to_string(),
        }
    }
}

impl AstTransform for ImageAttributesPass {
    fn transform(&self, root: &mut Node) {
        remark_image_attributes_with(root, &self.default_border);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossmark_core::RenderHint;

    fn run(children: Vec<Node>) -> Node {
        let mut root = Node::root(vec![Node::paragraph(children)]);
        remark_image_attributes(&mut root);
        root.children()[0].clone()
    }

    fn image(node: &Node) -> &Image {
        match node {
            Node::Image(image) => image,
            other => panic!("expected image, got {other:?}"),
        }
    }

    fn image_hint(image: &Image) -> &RenderHint {
        image.hint.as_ref().expect("image hinted")
    }

    #[test]
    fn width_and_default_border() {
        let para = run(vec![Node::image("./img/x.webp#w=80&border", "X")]);
        let img = image(&para.children()[0]);
        assert_eq!(img.url, "./img/x.webp");

        let hint = image_hint(img);
        assert_eq!(hint.style(), Some("width: 80%; border: 5px solid #ADADAD;"));
        assert_eq!(hint.property("data-slide-width"), Some("80"));
        assert_eq!(hint.property("data-slide-border"), Some("5px solid #ADADAD"));
        assert_eq!(hint.property("data-slide-align"), None);

        let wrapper = para.hint().unwrap();
        assert_eq!(wrapper.element.as_deref(), Some("div"));
        assert_eq!(wrapper.class(), Some("img-wrapper img-align-center"));
    }

    #[test]
    fn unknown_flag_is_dropped() {
        let para = run(vec![Node::image("./img/x.webp#foo&w=50", "")]);
        let hint = image_hint(image(&para.children()[0]));
        assert_eq!(hint.style(), Some("width: 50%;"));
        assert_eq!(hint.properties.len(), 2);
    }

    #[test]
    fn border_value_is_decoded() {
        let para = run(vec![Node::image("a.png#border=2px_solid_red", "")]);
        let hint = image_hint(image(&para.children()[0]));
        assert_eq!(hint.style(), Some("width: 100%; border: 2px solid red;"));
        assert_eq!(hint.property("data-slide-border"), Some("2px solid red"));
    }

    #[test]
    fn explicit_alignment() {
        let para = run(vec![Node::image("a.png#align=left", "")]);
        assert_eq!(para.hint().unwrap().class(), Some("img-wrapper img-align-left"));
        let hint = image_hint(image(&para.children()[0]));
        assert_eq!(hint.property("data-slide-align"), Some("left"));
    }

    #[test]
    fn unknown_alignment_falls_back_to_center() {
        let para = run(vec![Node::image("a.png#align=middle", "")]);
        assert_eq!(para.hint().unwrap().class(), Some("img-wrapper img-align-center"));
        assert_eq!(image_hint(image(&para.children()[0])).property("data-slide-align"), None);
    }

    #[test]
    fn raw_width_wins_over_percent() {
        let para = run(vec![Node::image("a.png#w=50&width=320px", "")]);
        let hint = image_hint(image(&para.children()[0]));
        assert_eq!(hint.style(), Some("width: 320px;"));
        assert_eq!(hint.property("data-slide-width"), None);
    }

    #[test]
    fn lone_plain_image_is_wrapped_and_centered() {
        let para = run(vec![Node::image("./img/plain.webp", "")]);
        let wrapper = para.hint().unwrap();
        assert_eq!(wrapper.element.as_deref(), Some("div"));
        assert_eq!(wrapper.class(), Some("img-wrapper img-align-center"));
        assert!(image(&para.children()[0]).hint.is_none());
    }

    #[test]
    fn plain_image_beside_text_is_left_alone() {
        let para = run(vec![Node::text("See "), Node::image("a.png", "")]);
        assert!(para.hint().is_none());
        assert!(image(&para.children()[1]).hint.is_none());
    }

    #[test]
    fn siblings_are_untouched() {
        let para = run(vec![
            Node::text("Before "),
            Node::image("a.png#w=30", ""),
            Node::image("b.png", ""),
        ]);
        assert_eq!(para.children()[0], Node::text("Before "));
        assert!(image(&para.children()[2]).hint.is_none());
        assert_eq!(image(&para.children()[2]).url, "b.png");
    }

    #[test]
    fn empty_fragment_still_wraps() {
        let para = run(vec![Node::image("a.png#", "")]);
        assert_eq!(image(&para.children()[0]).url, "a.png");
        assert_eq!(image_hint(image(&para.children()[0])).style(), Some("width: 100%;"));
        assert!(para.hint().is_some());
    }

    #[test]
    fn images_outside_paragraphs_are_ignored() {
        let mut root = Node::root(vec![Node::link("x", vec![Node::image("a.png#w=5", "")])]);
        let before = root.clone();
        remark_image_attributes(&mut root);
        assert_eq!(root, before);
    }
}
