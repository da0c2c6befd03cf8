//! Term dictionary: ordered `(term, definition)` pairs with case-insensitive lookup.

use crate::error::GlossaryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// Word or abbreviation to match (case-insensitive, whole word).
    pub term: String,
    /// Explanation attached to every match.
    pub definition: String,
}

impl GlossaryTerm {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// Validated, immutable glossary.
///
/// No two terms are equal ignoring case, so lookup is unambiguous.
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    entries: Vec<GlossaryTerm>,
    /// Lowercased term -> index into `entries`.
    index: HashMap<String, usize>,
}

impl TermDictionary {
    /// Builds a dictionary, rejecting blank terms and case-insensitive duplicates.
    pub fn new(entries: Vec<GlossaryTerm>) -> Result<Self, GlossaryError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.term.trim().is_empty() {
                return Err(GlossaryError::EmptyTerm { index: i });
            }
            if let Some(&existing) = index.get(&entry.term.to_lowercase()) {
                let existing: &GlossaryTerm = &entries[existing];
                return Err(GlossaryError::DuplicateTerm {
                    term: entry.term.clone(),
                    existing: existing.term.clone(),
                });
            }
            index.insert(entry.term.to_lowercase(), i);
        }
        Ok(Self { entries, index })
    }

    /// Reads a JSON array of `{"term": ..., "definition": ...}` records.
    pub fn from_json(json: &str) -> Result<Self, GlossaryError> {
        let entries: Vec<GlossaryTerm> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The built-in glossary.
    pub fn builtin() -> Result<Self, GlossaryError> {
        Self::new(super::defaults::default_glossary())
    }

    /// Definition for `term`, compared case-insensitively.
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.get(term).map(|entry| entry.definition.as_str())
    }

    /// Entry for `term`, compared case-insensitively.
    pub fn get(&self, term: &str) -> Option<&GlossaryTerm> {
        self.index
            .get(&term.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[GlossaryTerm] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
