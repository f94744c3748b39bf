//! Concept dictionary and extraction
//!
//! A concept is a semantic tag ("budget", "spicy") triggered by any of its
//! keywords. Triggers are grouped per locale in the JSON asset so a new
//! language only adds entries to the file.
//!
//! Matching is exact-token: "biryanis" does not trigger `biryani`, and
//! multi-word or hyphenated triggers never match because the tokenizer
//! splits them.

use ahash::AHashSet;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::warn;

use crate::error::DictionaryError;

const DEFAULT_ASSET: &str = include_str!("../assets/concepts.json");

/// On-disk layout: concept -> locale -> triggers
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    concepts: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone)]
struct Concept {
    name: String,
    triggers: AHashSet<String>,
}

/// Immutable mapping from concept name to trigger keywords
#[derive(Debug, Clone)]
pub struct ConceptDictionary {
    concepts: Vec<Concept>,
}

impl ConceptDictionary {
    /// Parse a dictionary from its JSON form
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let file: DictionaryFile = serde_json::from_str(json)?;
        if file.concepts.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let mut concepts = Vec::with_capacity(file.concepts.len());
        for (name, locales) in file.concepts {
            let triggers: AHashSet<String> = locales
                .into_values()
                .flatten()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();

            if triggers.is_empty() {
                return Err(DictionaryError::EmptyConcept(name));
            }
            concepts.push(Concept { name, triggers });
        }

        Ok(Self { concepts })
    }

    /// Load a dictionary asset from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Concepts whose triggers intersect the token set
    pub fn extract(&self, tokens: &AHashSet<String>) -> BTreeSet<String> {
        self.concepts
            .iter()
            .filter(|concept| concept.triggers.iter().any(|t| tokens.contains(t)))
            .map(|concept| concept.name.clone())
            .collect()
    }

    /// Concept names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.concepts.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl ConceptDictionary {
    /// Parse or degrade to an empty dictionary, logging the failure
    fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("Concept dictionary is invalid, matching on ratings only: {e}");
            Self {
                concepts: Vec::new(),
            }
        })
    }
}

impl Default for ConceptDictionary {
    fn default() -> Self {
        Self::from_json_or_empty(DEFAULT_ASSET)
    }
}
