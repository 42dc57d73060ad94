use super::models::{Entry, EntryId, EntryKind, RawEntry};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("entry at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate entry id `{0}`")]
    DuplicateId(EntryId),
}

/// The immutable, id-unique collection of every searchable entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    positions: HashMap<EntryId, usize>,
}

impl Catalog {
    /// Merges blocks then patterns into one collection. Records without a
    /// usable id, or whose id was already taken, get a fresh one.
    #[must_use]
    pub fn load(blocks: &[RawEntry], patterns: &[RawEntry]) -> Self {
        let mut seen = HashSet::with_capacity(blocks.len() + patterns.len());
        let entries: Vec<Entry> = blocks
            .iter()
            .chain(patterns)
            .map(|raw| {
                let given = raw.id.as_deref().filter(|id| !id.trim().is_empty());
                let id = match given {
                    Some(id) if !seen.contains(id) => id.to_string(),
                    Some(id) => {
                        let fresh = fresh_id(&seen);
                        tracing::warn!(duplicate = id, assigned = %fresh, "reassigning duplicate entry id");
                        fresh
                    }
                    _ => fresh_id(&seen),
                };
                seen.insert(id.clone());
                Entry {
                    id: EntryId(id),
                    title: raw.title.clone(),
                    description: raw.description.clone(),
                    name: raw.name.clone(),
                    kind: EntryKind::from_content(raw.content.as_deref()),
                }
            })
            .collect();

        tracing::debug!(
            blocks = blocks.len(),
            patterns = patterns.len(),
            "catalog loaded"
        );
        Self::index(entries)
    }

    /// Builds a catalog from already-typed entries, rejecting broken ids.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.id.0.trim().is_empty() {
                return Err(CatalogError::EmptyId(i));
            }
            if !seen.insert(&entry.id) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self::index(entries))
    }

    fn index(entries: Vec<Entry>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { entries, positions }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.position(id).map(|i| &self.entries[i])
    }
}

fn fresh_id(taken: &HashSet<String>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken.contains(&id) {
            return id;
        }
    }
}
