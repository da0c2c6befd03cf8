use glossmark_core::GlossmarkError;
use thiserror::Error;

/// Errors raised while building a term dictionary or matcher.
#[derive(Debug, Error)]
pub enum GlossaryError {
    /// Two entries whose terms are equal ignoring case.
    #[error("Duplicate glossary term {term:?} (conflicts with {existing:?})")]
    DuplicateTerm {
        /// Term being added.
        term: String,
        /// Term already present.
        existing: String,
    },
    /// Entry with an empty or blank term.
    #[error("Glossary entry {index} has an empty term")]
    EmptyTerm {
        /// Position of the entry in the input list.
        index: usize,
    },
    /// The compiled term pattern was rejected by the regex engine.
    #[error("Glossary pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// Glossary JSON could not be read.
    #[error("Glossary JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building or running a [`crate::Pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Tree producer failure.
    #[error(transparent)]
    Parse(#[from] GlossmarkError),
    /// Glossary configuration failure.
    #[error(transparent)]
    Glossary(#[from] GlossaryError),
    /// Pipeline options could not be read.
    #[error("Invalid pipeline options: {0}")]
    Options(#[source] serde_json::Error),
}

impl PipelineError {
    /// Attach a document path to parse errors.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::Parse(err) => Self::Parse(err.in_file(file)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_file_only_touches_parse_errors() {
        let err = PipelineError::from(GlossmarkError::parse_error("bad", 4, 2)).in_file("docs/a.md");
        assert_eq!(err.to_string(), "Parse error at docs/a.md:4:2: bad");

        let err = PipelineError::from(GlossaryError::EmptyTerm { index: 3 }).in_file("docs/a.md");
        assert_eq!(err.to_string(), "Glossary entry 3 has an empty term");
    }
}
