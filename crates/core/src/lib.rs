//! glossmark core: document tree, traversal, and the markdown adapters at its edges.

/// Container directive line syntax.
pub mod directive;
/// Core error types.
pub mod error;
/// Fenced code tracking for directive scanning.
pub mod fence;
/// Markdown parsing and the transform pipeline.
pub mod parse;
/// HTML output honouring render hints.
pub mod render;
/// Document tree types.
pub mod tree;
/// Depth-first traversal and splicing.
pub mod walk;

pub use directive::{DirectiveOpening, parse_attributes, parse_directive_opening};
pub use error::{GlossmarkError, SourceLocation};
pub use parse::{AstTransform, ParseOptions, ParserPipeline, parse_document};
pub use render::to_html;
pub use tree::{
    Attributes, Code, ContainerDirective, Heading, Image, Link, List, ListItem, Literal, Node, NodeKind,
    Parent, RenderHint, Void,
};
pub use walk::{Ancestor, Rewrite, splice_mut, visit_mut};
