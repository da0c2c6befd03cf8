//! The configured pass sequence: center, figure, glossary, image attributes.
//!
//! Order matters: figure splits paragraphs before glossary terms are
//! annotated, and glossary markup is already raw when image attributes run.

use crate::attributes::DEFAULT_BORDER;
use crate::center::CenterPass;
use crate::error::PipelineError;
use crate::figure::FigurePass;
use crate::glossary::{GlossaryPass, GlossaryTerm, TermDictionary, TermMatcher};
use crate::image::ImageAttributesPass;
use glossmark_core::{Node, ParseOptions, ParserPipeline, to_html};
use serde::Deserialize;
use std::sync::Arc;

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Rewrite `:::center` directives.
    pub enable_center: bool,
    /// Rewrite `:::figure` directives.
    pub enable_figure: bool,
    /// Annotate glossary terms.
    pub enable_glossary: bool,
    /// Apply image reference fragments.
    pub enable_image_attributes: bool,
    /// Border used for bare `border` flags.
    pub default_border: String,
    /// Glossary terms; the built-in list when absent.
    pub glossary: Option<Vec<GlossaryTerm>>,
    /// Tree producer options.
    pub parse: ParseOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            enable_center: true,
            enable_figure: true,
            enable_glossary: true,
            enable_image_attributes: true,
            default_border: DEFAULT_BORDER.to_string(),
            glossary: None,
            parse: ParseOptions::default(),
        }
    }
}

impl PipelineOptions {
    /// Reads options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json).map_err(PipelineError::Options)
    }

    /// Builds the term dictionary these options describe.
    pub fn dictionary(&self) -> Result<TermDictionary, PipelineError> {
        let dictionary = match &self.glossary {
            Some(terms) => TermDictionary::new(terms.clone())?,
            None => TermDictionary::builtin()?,
        };
        Ok(dictionary)
    }
}

/// Parser plus the enabled passes in their fixed order.
///
/// `Send + Sync`: one pipeline serves many documents, including from
/// [`crate::batch::process_batch`] workers.
pub struct Pipeline {
    inner: ParserPipeline,
    matcher: Option<Arc<TermMatcher>>,
}

impl Pipeline {
    /// Builds a pipeline, compiling the glossary when enabled.
    pub fn new(options: &PipelineOptions) -> Result<Self, PipelineError> {
        let matcher = if options.enable_glossary {
            Some(Arc::new(TermMatcher::new(options.dictionary()?)?))
        } else {
            None
        };
        Ok(Self::with_matcher(options, matcher))
    }

    /// Builds a pipeline around an already compiled matcher.
    pub fn with_matcher(options: &PipelineOptions, matcher: Option<Arc<TermMatcher>>) -> Self {
        let mut inner = ParserPipeline::new(options.parse);
        if options.enable_center {
            inner.add_ast_transform(CenterPass);
        }
        if options.enable_figure {
            inner.add_ast_transform(FigurePass {
                default_border: options.default_border.clone(),
            });
        }
        if let Some(matcher) = &matcher {
            inner.add_ast_transform(GlossaryPass::new(Arc::clone(matcher)));
        }
        if options.enable_image_attributes {
            inner.add_ast_transform(ImageAttributesPass {
                default_border: options.default_border.clone(),
            });
        }
        log::debug!("Built pipeline with {} passes", inner.len());
        Self { inner, matcher }
    }

    /// The compiled glossary matcher, if glossary annotation is enabled.
    pub fn matcher(&self) -> Option<&TermMatcher> {
        self.matcher.as_deref()
    }

    /// Runs the passes over an existing tree.
    pub fn transform(&self, root: &mut Node) {
        self.inner.apply(root);
    }

    /// Parses markdown and runs the passes.
    pub fn process(&self, source: &str) -> Result<Node, PipelineError> {
        Ok(self.inner.parse(source)?)
    }

    /// Parses, runs the passes, and renders HTML.
    pub fn render(&self, source: &str) -> Result<String, PipelineError> {
        let root = self.process(source)?;
        Ok(to_html(&root))
    }
}
