//! Document tree: a closed node type with render hints layered on top.
//!
//! The shape follows mdast (root, block, inline, literal nodes) with one extra
//! kind for container directives. A node never changes kind once built; passes
//! change presentation by setting the node's [`RenderHint`].

use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute map carried by directive nodes. Keys are unique, last write wins.
pub type Attributes = BTreeMap<String, String>;

/// Rendering instruction attached to a node by a rewrite pass.
///
/// `element` replaces the node's default output element; `properties` become
/// output attributes (`class`, `style`, `data-*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderHint {
    /// Output element name, when it differs from the node's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Presentation attributes, emitted in key order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl RenderHint {
    /// Creates a hint that renders the node as `element`.
    pub fn element(element: impl Into<String>) -> Self {
        Self {
            element: Some(element.into()),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Sets the output element name.
    pub fn set_element(&mut self, element: impl Into<String>) {
        self.element = Some(element.into());
    }

    /// Sets (or overwrites) a presentation property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Returns a property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns the `class` property.
    pub fn class(&self) -> Option<&str> {
        self.property("class")
    }

    /// Returns the `style` property.
    pub fn style(&self) -> Option<&str> {
        self.property("style")
    }
}

/// Discriminant of a [`Node`], cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    Blockquote,
    List,
    ListItem,
    ContainerDirective,
    Table,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Delete,
    Link,
    Text,
    InlineCode,
    Code,
    Image,
    Html,
    Break,
    ThematicBreak,
    Frontmatter,
}

/// Node whose only kind-specific content is its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parent {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

impl Parent {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            hint: None,
        }
    }
}

/// Leaf node carrying a literal string (text, inline code, raw markup, frontmatter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            hint: None,
        }
    }
}

/// Leaf node with no content (hard break, thematic break).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Void {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 1 through 6.
    pub depth: u8,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// Loose list: items are separated by blank lines.
    pub spread: bool,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// GFM task state; `None` for ordinary items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Children separated by blank lines.
    pub spread: bool,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

/// A `:::name[label]{attrs}` block, already recognised by the tree producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerDirective {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Code {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<RenderHint>,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Parent),
    Paragraph(Parent),
    Heading(Heading),
    Blockquote(Parent),
    List(List),
    ListItem(ListItem),
    ContainerDirective(ContainerDirective),
    Table(Parent),
    TableRow(Parent),
    TableCell(Parent),
    Emphasis(Parent),
    Strong(Parent),
    Delete(Parent),
    Link(Link),
    Text(Literal),
    InlineCode(Literal),
    Code(Code),
    Image(Image),
    /// Raw markup passed through to the output untouched.
    Html(Literal),
    Break(Void),
    ThematicBreak(Void),
    Frontmatter(Literal),
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Parent::new(children))
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Parent::new(children))
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Parent::new(children))
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Parent::new(children))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Literal::new(value))
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(Literal::new(value))
    }

    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Literal::new(value))
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            children,
            ..Default::default()
        })
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Node::Image(Image {
            url: url.into(),
            alt: alt.into(),
            ..Default::default()
        })
    }

    pub fn directive(name: impl Into<String>, attributes: Attributes, children: Vec<Node>) -> Self {
        Node::ContainerDirective(ContainerDirective {
            name: name.into(),
            attributes,
            children,
            ..Default::default()
        })
    }

    /// Returns the node's kind tag.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading(_) => NodeKind::Heading,
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::List(_) => NodeKind::List,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::ContainerDirective(_) => NodeKind::ContainerDirective,
            Node::Table(_) => NodeKind::Table,
            Node::TableRow(_) => NodeKind::TableRow,
            Node::TableCell(_) => NodeKind::TableCell,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::Strong(_) => NodeKind::Strong,
            Node::Delete(_) => NodeKind::Delete,
            Node::Link(_) => NodeKind::Link,
            Node::Text(_) => NodeKind::Text,
            Node::InlineCode(_) => NodeKind::InlineCode,
            Node::Code(_) => NodeKind::Code,
            Node::Image(_) => NodeKind::Image,
            Node::Html(_) => NodeKind::Html,
            Node::Break(_) => NodeKind::Break,
            Node::ThematicBreak(_) => NodeKind::ThematicBreak,
            Node::Frontmatter(_) => NodeKind::Frontmatter,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(p)
            | Node::Paragraph(p)
            | Node::Blockquote(p)
            | Node::Table(p)
            | Node::TableRow(p)
            | Node::TableCell(p)
            | Node::Emphasis(p)
            | Node::Strong(p)
            | Node::Delete(p) => &p.children,
            Node::ListItem(item) => &item.children,
            Node::Heading(h) => &h.children,
            Node::List(l) => &l.children,
            Node::ContainerDirective(d) => &d.children,
            Node::Link(l) => &l.children,
            Node::Text(_)
            | Node::InlineCode(_)
            | Node::Code(_)
            | Node::Image(_)
            | Node::Html(_)
            | Node::Break(_)
            | Node::ThematicBreak(_)
            | Node::Frontmatter(_) => &[],
        }
    }

    /// Mutable child vector, `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(p)
            | Node::Paragraph(p)
            | Node::Blockquote(p)
            | Node::Table(p)
            | Node::TableRow(p)
            | Node::TableCell(p)
            | Node::Emphasis(p)
            | Node::Strong(p)
            | Node::Delete(p) => Some(&mut p.children),
            Node::ListItem(item) => Some(&mut item.children),
            Node::Heading(h) => Some(&mut h.children),
            Node::List(l) => Some(&mut l.children),
            Node::ContainerDirective(d) => Some(&mut d.children),
            Node::Link(l) => Some(&mut l.children),
            Node::Text(_)
            | Node::InlineCode(_)
            | Node::Code(_)
            | Node::Image(_)
            | Node::Html(_)
            | Node::Break(_)
            | Node::ThematicBreak(_)
            | Node::Frontmatter(_) => None,
        }
    }

    /// The node's render hint, if a pass assigned one.
    pub fn hint(&self) -> Option<&RenderHint> {
        self.hint_slot().as_ref()
    }

    /// The render hint, created empty when absent.
    pub fn hint_mut(&mut self) -> &mut RenderHint {
        self.hint_slot_mut().get_or_insert_with(RenderHint::default)
    }

    /// Replaces the render hint wholesale.
    pub fn set_hint(&mut self, hint: Option<RenderHint>) {
        *self.hint_slot_mut() = hint;
    }

    fn hint_slot(&self) -> &Option<RenderHint> {
        match self {
            Node::Root(p)
            | Node::Paragraph(p)
            | Node::Blockquote(p)
            | Node::Table(p)
            | Node::TableRow(p)
            | Node::TableCell(p)
            | Node::Emphasis(p)
            | Node::Strong(p)
            | Node::Delete(p) => &p.hint,
            Node::ListItem(item) => &item.hint,
            Node::Heading(h) => &h.hint,
            Node::List(l) => &l.hint,
            Node::ContainerDirective(d) => &d.hint,
            Node::Link(l) => &l.hint,
            Node::Text(l) | Node::InlineCode(l) | Node::Html(l) | Node::Frontmatter(l) => &l.hint,
            Node::Code(c) => &c.hint,
            Node::Image(i) => &i.hint,
            Node::Break(v) | Node::ThematicBreak(v) => &v.hint,
        }
    }

    fn hint_slot_mut(&mut self) -> &mut Option<RenderHint> {
        match self {
            Node::Root(p)
            | Node::Paragraph(p)
            | Node::Blockquote(p)
            | Node::Table(p)
            | Node::TableRow(p)
            | Node::TableCell(p)
            | Node::Emphasis(p)
            | Node::Strong(p)
            | Node::Delete(p) => &mut p.hint,
            Node::ListItem(item) => &mut item.hint,
            Node::Heading(h) => &mut h.hint,
            Node::List(l) => &mut l.hint,
            Node::ContainerDirective(d) => &mut d.hint,
            Node::Link(l) => &mut l.hint,
            Node::Text(l) | Node::InlineCode(l) | Node::Html(l) | Node::Frontmatter(l) => {
                &mut l.hint
            }
            Node::Code(c) => &mut c.hint,
            Node::Image(i) => &mut i.hint,
            Node::Break(v) | Node::ThematicBreak(v) => &mut v.hint,
        }
    }

    /// Concatenated text of all `Text` and `InlineCode` descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Serializes the tree to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) | Node::InlineCode(text) => out.push_str(&text.value),
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Node::text("a").kind(), NodeKind::Text);
        assert_eq!(Node::image("x.png", "").kind(), NodeKind::Image);
        assert_eq!(
            Node::directive("figure", Attributes::new(), vec![]).kind(),
            NodeKind::ContainerDirective
        );
    }

    #[test]
    fn leaves_have_no_children() {
        let mut text = Node::text("hello");
        assert!(text.children().is_empty());
        assert!(text.children_mut().is_none());

        let mut para = Node::paragraph(vec![Node::text("hello")]);
        assert_eq!(para.children().len(), 1);
        assert!(para.children_mut().is_some());
    }

    #[test]
    fn hint_mut_creates_empty_hint() {
        let mut node = Node::paragraph(vec![]);
        assert!(node.hint().is_none());
        node.hint_mut().set_element("div");
        node.hint_mut().set_property("class", "wrapper");

        let hint = node.hint().expect("hint set");
        assert_eq!(hint.element.as_deref(), Some("div"));
        assert_eq!(hint.class(), Some("wrapper"));
        assert_eq!(node.kind(), NodeKind::Paragraph);
    }

    #[test]
    fn text_content_walks_inline_nodes() {
        let node = Node::paragraph(vec![
            Node::text("See "),
            Node::emphasis(vec![Node::text("the ")]),
            Node::inline_code("code"),
            Node::image("x.png", "ignored"),
        ]);
        assert_eq!(node.text_content(), "See the code");
    }

    #[test]
    fn serializes_with_type_tag() {
        let node = Node::paragraph(vec![Node::text("hi")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["children"][0]["type"], "text");
        assert_eq!(json["children"][0]["value"], "hi");
        assert!(json.get("hint").is_none());
    }

    #[test]
    fn to_json_includes_hints_and_task_state() {
        let mut para = Node::paragraph(vec![Node::text("Caption")]);
        para.set_hint(Some(
            RenderHint::element("figcaption").with_property("class", "md-figcaption"),
        ));
        let item = Node::ListItem(ListItem {
            checked: Some(true),
            children: vec![para],
            ..Default::default()
        });

        let json = item.to_json().unwrap();
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "listItem");
        assert_eq!(value["checked"], true);
        assert_eq!(value["spread"], false);
        let hint = &value["children"][0]["hint"];
        assert_eq!(hint["element"], "figcaption");
        assert_eq!(hint["properties"]["class"], "md-figcaption");
    }
}
