//! Tree producer: markdown-rs parsing, directive scanning, and the transform pipeline.

use crate::directive::{DirectiveOpening, directive_closer_len, parse_directive_opening};
use crate::fence::FenceTracker;
use crate::tree::{
    Code, ContainerDirective, Heading, Image, Link, List, ListItem, Literal, Node, Parent, Void,
};
use crate::{GlossmarkError, SourceLocation};
use markdown::mdast;
use markdown::message::{Message, Place};
use serde::Deserialize;
use std::collections::HashMap;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Recognise `:::name` container directives.
    pub directives: bool,
}

impl ParseOptions {
    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            // Raw HTML stays text; passes emit markup only through `html` nodes.
            html_flow: false,
            html_text: false,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            frontmatter: true,
            directives: true,
        }
    }
}

/// Trait for mutating the document tree after parsing.
pub trait AstTransform {
    /// Mutate the tree in place.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node),
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Parsing followed by an ordered list of tree transforms.
pub struct ParserPipeline {
    options: ParseOptions,
    ast_transforms: Vec<Box<dyn AstTransform + Send + Sync>>,
}

impl ParserPipeline {
    /// Create an empty pipeline.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ast_transforms: Vec::new(),
        }
    }

    /// Append a transform; transforms run in insertion order.
    pub fn add_ast_transform<T: AstTransform + Send + Sync + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Number of registered transforms.
    pub fn len(&self) -> usize {
        self.ast_transforms.len()
    }

    /// Whether no transforms are registered.
    pub fn is_empty(&self) -> bool {
        self.ast_transforms.is_empty()
    }

    /// Run every transform over an existing tree.
    pub fn apply(&self, root: &mut Node) {
        for transform in &self.ast_transforms {
            transform.transform(root);
        }
    }

    /// Parse markdown and run the transforms.
    pub fn parse(&self, input: &str) -> Result<Node, GlossmarkError> {
        let mut root = parse_document(input, &self.options)?;
        self.apply(&mut root);
        Ok(root)
    }
}

/// Parse markdown into a document tree.
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<Node, GlossmarkError> {
    let children = if options.directives {
        let mut scanner = DirectiveScanner {
            options: *options,
            frontmatter_pending: options.frontmatter,
        };
        scanner.parse_flow(input)?
    } else {
        parse_markdown(input, &options.to_markdown())?
    };
    Ok(Node::root(children))
}

/// Splits source into markdown runs and directive blocks.
struct DirectiveScanner {
    options: ParseOptions,
    /// Frontmatter is only valid before the first non-blank line.
    frontmatter_pending: bool,
}

impl DirectiveScanner {
    fn parse_flow(&mut self, input: &str) -> Result<Vec<Node>, GlossmarkError> {
        let mut nodes = Vec::new();
        let mut pending = String::new();
        let mut fence = FenceTracker::default();
        let mut lines = input.split_inclusive('\n');

        while let Some(line) = lines.next() {
            let bare = line.trim_end_matches(['\r', '\n']);
            if !fence.observe(bare)
                && let Some(opening) = parse_directive_opening(bare)
            {
                self.flush(&mut pending, &mut nodes)?;
                self.frontmatter_pending = false;
                let body = collect_body(&mut lines, &opening);
                let children = self.parse_flow(&body)?;
                nodes.push(directive_node(opening, children));
                continue;
            }
            pending.push_str(line);
        }

        self.flush(&mut pending, &mut nodes)?;
        Ok(nodes)
    }

    fn flush(&mut self, pending: &mut String, nodes: &mut Vec<Node>) -> Result<(), GlossmarkError> {
        if pending.trim().is_empty() {
            pending.clear();
            return Ok(());
        }
        let options = ParseOptions {
            frontmatter: self.frontmatter_pending,
            ..self.options
        };
        self.frontmatter_pending = false;
        nodes.extend(parse_markdown(pending, &options.to_markdown())?);
        pending.clear();
        Ok(())
    }
}

/// Collects lines up to the closer matching `opening`, tracking nested
/// directives and fenced code. An unclosed directive runs to end of input.
fn collect_body<'a>(lines: &mut impl Iterator<Item = &'a str>, opening: &DirectiveOpening) -> String {
    let mut body = String::new();
    let mut nested: Vec<usize> = Vec::new();
    let mut fence = FenceTracker::default();

    for line in lines.by_ref() {
        let bare = line.trim_end_matches(['\r', '\n']);
        if !fence.observe(bare) {
            if let Some(len) = directive_closer_len(bare) {
                match nested.last() {
                    Some(&inner) if len >= inner => {
                        nested.pop();
                    }
                    None if len >= opening.fence_len => return body,
                    _ => {}
                }
            } else if let Some(inner) = parse_directive_opening(bare) {
                nested.push(inner.fence_len);
            }
        }
        body.push_str(line);
    }

    log::warn!("Unclosed :::{} directive runs to end of input", opening.name);
    body
}

fn directive_node(opening: DirectiveOpening, children: Vec<Node>) -> Node {
    Node::ContainerDirective(ContainerDirective {
        name: opening.name,
        label: opening.label,
        attributes: opening.attributes,
        children,
        hint: None,
    })
}

fn parse_markdown(input: &str, options: &markdown::ParseOptions) -> Result<Vec<Node>, GlossmarkError> {
    let root = markdown::to_mdast(input, options).map_err(|err| {
        let location = message_location(&err);
        GlossmarkError::parse_error(err.to_string(), location.line, location.column)
    })?;
    let mut converter = Converter::default();
    converter.collect_definitions(&root);
    let mut nodes = Vec::new();
    converter.convert(root, &mut nodes);
    Ok(nodes)
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

/// Link reference definition target.
#[derive(Debug, Clone)]
struct Definition {
    url: String,
    title: Option<String>,
}

/// Case-folded, whitespace-collapsed reference label.
fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// mdast to tree conversion, with reference links and images resolved
/// against the definitions of the same markdown run.
#[derive(Debug, Default)]
struct Converter {
    definitions: HashMap<String, Definition>,
}

impl Converter {
    fn collect_definitions(&mut self, node: &mdast::Node) {
        if let mdast::Node::Definition(definition) = node {
            // The first definition of a label wins.
            self.definitions
                .entry(normalize_label(&definition.identifier))
                .or_insert_with(|| Definition {
                    url: definition.url.clone(),
                    title: definition.title.clone(),
                });
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    fn resolve(&self, identifier: &str) -> Option<&Definition> {
        self.definitions.get(&normalize_label(identifier))
    }

    fn convert_all(&self, children: Vec<mdast::Node>) -> Vec<Node> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            self.convert(child, &mut out);
        }
        out
    }

    fn parent(&self, children: Vec<mdast::Node>) -> Parent {
        Parent::new(self.convert_all(children))
    }

    /// Converts an mdast node, appending zero or more tree nodes to `out`.
    fn convert(&self, node: mdast::Node, out: &mut Vec<Node>) {
        let converted = match node {
            mdast::Node::Root(root) => {
                out.extend(self.convert_all(root.children));
                return;
            }
            mdast::Node::Paragraph(p) => Node::Paragraph(self.parent(p.children)),
            mdast::Node::Heading(h) => Node::Heading(Heading {
                depth: h.depth,
                children: self.convert_all(h.children),
                hint: None,
            }),
            mdast::Node::Blockquote(q) => Node::Blockquote(self.parent(q.children)),
            mdast::Node::List(l) => Node::List(List {
                ordered: l.ordered,
                start: l.start,
                spread: l.spread,
                children: self.convert_all(l.children),
                hint: None,
            }),
            mdast::Node::ListItem(item) => Node::ListItem(ListItem {
                checked: item.checked,
                spread: item.spread,
                children: self.convert_all(item.children),
                hint: None,
            }),
            mdast::Node::Table(t) => Node::Table(self.parent(t.children)),
            mdast::Node::TableRow(r) => Node::TableRow(self.parent(r.children)),
            mdast::Node::TableCell(c) => Node::TableCell(self.parent(c.children)),
            mdast::Node::Emphasis(e) => Node::Emphasis(self.parent(e.children)),
            mdast::Node::Strong(s) => Node::Strong(self.parent(s.children)),
            mdast::Node::Delete(d) => Node::Delete(self.parent(d.children)),
            mdast::Node::Link(l) => Node::Link(Link {
                url: l.url,
                title: l.title,
                children: self.convert_all(l.children),
                hint: None,
            }),
            mdast::Node::Text(t) => Node::Text(Literal::new(t.value)),
            mdast::Node::InlineCode(c) => Node::InlineCode(Literal::new(c.value)),
            mdast::Node::Code(c) => Node::Code(Code {
                lang: c.lang,
                meta: c.meta,
                value: c.value,
                hint: None,
            }),
            mdast::Node::Image(i) => Node::Image(Image {
                url: i.url,
                alt: i.alt,
                title: i.title,
                hint: None,
            }),
            mdast::Node::Html(h) => Node::Html(Literal::new(h.value)),
            mdast::Node::Break(_) => Node::Break(Void::default()),
            mdast::Node::ThematicBreak(_) => Node::ThematicBreak(Void::default()),
            mdast::Node::Yaml(y) => Node::Frontmatter(Literal::new(y.value)),
            mdast::Node::LinkReference(r) => match self.resolve(&r.identifier) {
                Some(definition) => Node::Link(Link {
                    url: definition.url.clone(),
                    title: definition.title.clone(),
                    children: self.convert_all(r.children),
                    hint: None,
                }),
                None => {
                    log::warn!("Unresolved link reference [{}]", r.identifier);
                    out.extend(self.convert_all(r.children));
                    return;
                }
            },
            mdast::Node::ImageReference(r) => match self.resolve(&r.identifier) {
                Some(definition) => Node::Image(Image {
                    url: definition.url.clone(),
                    alt: r.alt,
                    title: definition.title.clone(),
                    hint: None,
                }),
                None => {
                    log::warn!("Unresolved image reference [{}]", r.identifier);
                    Node::Text(Literal::new(r.alt))
                }
            },
            // Definitions are consumed by reference resolution.
            mdast::Node::Definition(_) => return,
            other => {
                log::warn!("Unhandled markdown node type: {:?}", other);
                return;
            }
        };
        out.push(converted);
    }
}
