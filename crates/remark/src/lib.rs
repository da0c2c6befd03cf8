//! glossmark rewrite passes for documentation trees.
//!
//! Each pass is a plain function over a [`glossmark_core::Node`] tree and an
//! [`glossmark_core::AstTransform`] wrapper for the [`Pipeline`]:
//!
//! - `center`: `:::center` → centered `div`.
//! - `figure`: `:::figure` → `figure` with images above a `figcaption`.
//! - `glossary`: dictionary terms in prose → `<abbr>` with the definition.
//! - `image`: `![](x.webp#w=80&border)` fragments → inline style and wrapper.

/// Fragment and directive attribute micro-syntax.
pub mod attributes;
/// Parallel document processing.
pub mod batch;
/// `:::center` rewriting.
pub mod center;
/// Error types.
pub mod error;
/// `:::figure` rewriting.
pub mod figure;
/// Glossary dictionary, matcher, and pass.
pub mod glossary;
/// Image fragment rewriting.
pub mod image;
/// The configured pass sequence.
pub mod pipeline;

pub use attributes::{Alignment, DEFAULT_BORDER, Width};
pub use batch::{
    BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats, process_batch,
    process_batch_with,
};
pub use center::{CenterPass, remark_center};
pub use error::{GlossaryError, PipelineError};
pub use figure::{FigureAttributes, FigurePass, remark_figure, remark_figure_with};
pub use glossary::{
    GlossaryPass, GlossaryTerm, ScanContext, Span, TermDictionary, TermMatcher, remark_glossary,
};
pub use image::{
    ImageAttributes, ImageAttributesPass, remark_image_attributes, remark_image_attributes_with,
};
pub use pipeline::{Pipeline, PipelineOptions};
