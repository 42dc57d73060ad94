pub mod fuzzy;

use crate::domain::models::{Entry, EntryId};
use fuzzy::score_field;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("entry at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate entry id `{0}`")]
    DuplicateId(EntryId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Field scores above this are not matches (0.0 = exact only, 1.0 = anything).
    pub threshold: f64,
    /// How many characters into a field a match may start before the
    /// location penalty alone reaches 1.0.
    pub distance: usize,
    pub title_weight: f64,
    pub description_weight: f64,
    pub name_weight: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            distance: 100,
            title_weight: 2.0,
            description_weight: 1.0,
            name_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: EntryId,
    /// Lower is more relevant, in `[0.0, 1.0]`.
    pub score: f64,
    /// Position of the entry in the catalog.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct IndexedField {
    chars: Vec<char>,
    norm: f64,
}

impl IndexedField {
    fn new(text: Option<&str>) -> Option<Self> {
        let text = text?.trim();
        if text.is_empty() {
            return None;
        }
        let words = text.split_whitespace().count().max(1);
        Some(Self {
            chars: text.to_lowercase().chars().collect(),
            norm: 1.0 / (words as f64).sqrt(),
        })
    }
}

/// The searchable projection of an entry. Content bodies are never indexed.
#[derive(Debug, Clone, PartialEq)]
struct IndexRecord {
    id: EntryId,
    title: Option<IndexedField>,
    description: Option<IndexedField>,
    name: Option<IndexedField>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchIndex {
    records: Vec<IndexRecord>,
    options: SearchOptions,
}

impl SearchIndex {
    pub fn build(entries: &[Entry]) -> Result<Self, IndexError> {
        Self::build_with(entries, SearchOptions::default())
    }

    pub fn build_with(entries: &[Entry], options: SearchOptions) -> Result<Self, IndexError> {
        let mut seen = HashSet::with_capacity(entries.len());
        let records = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if entry.id.as_str().trim().is_empty() {
                    return Err(IndexError::EmptyId(i));
                }
                if !seen.insert(&entry.id) {
                    return Err(IndexError::DuplicateId(entry.id.clone()));
                }
                Ok(IndexRecord {
                    id: entry.id.clone(),
                    title: IndexedField::new(entry.title.as_deref()),
                    description: IndexedField::new(entry.description.as_deref()),
                    name: IndexedField::new(entry.name.as_deref()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(records = records.len(), "search index built");
        Ok(Self { records, options })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Ranks every entry against `text`, best match first.
    ///
    /// Blank text yields nothing. Entries whose title contains the text
    /// verbatim always rank above entries that only match approximately or
    /// through a secondary field; within each group the weighted score decides
    /// and ties keep catalog order.
    #[must_use]
    pub fn query(&self, text: &str) -> Vec<SearchResult> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let pattern: Vec<char> = text.to_lowercase().chars().collect();

        let mut results: Vec<SearchResult> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                self.score_record(record, &pattern)
                    .map(|score| SearchResult {
                        id: record.id.clone(),
                        score,
                        position,
                    })
            })
            .collect();

        results.sort_by(|a, b| a.score.total_cmp(&b.score));
        results
    }

    fn score_record(&self, record: &IndexRecord, pattern: &[char]) -> Option<f64> {
        let opts = &self.options;
        let fields = [
            (&record.title, opts.title_weight),
            (&record.description, opts.description_weight),
            (&record.name, opts.name_weight),
        ];

        let mut combined = 1.0_f64;
        let mut matched = false;
        for (field, weight) in fields {
            let Some(field) = field else { continue };
            let Some(m) = score_field(pattern, &field.chars, opts.threshold, opts.distance) else {
                continue;
            };
            matched = true;
            let base = if m.score == 0.0 && weight > 0.0 {
                f64::EPSILON
            } else {
                m.score
            };
            combined *= base.powf(weight * field.norm);
        }
        if !matched {
            return None;
        }

        let exact_title = record
            .title
            .as_ref()
            .is_some_and(|t| contains_chars(&t.chars, pattern));
        Some(if exact_title {
            combined * 0.5
        } else {
            0.5 + combined * 0.5
        })
    }
}

fn contains_chars(haystack: &[char], needle: &[char]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
