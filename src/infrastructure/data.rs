use crate::domain::models::RawEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_BLOCKS: &str = include_str!("../../data/blocks.json");
const BUNDLED_PATTERNS: &str = include_str!("../../data/patterns.json");

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read catalog data from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog data in {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The two raw collections the catalog is merged from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCatalog {
    pub blocks: Vec<RawEntry>,
    pub patterns: Vec<RawEntry>,
}

pub fn parse_entries(json: &str, origin: &str) -> Result<Vec<RawEntry>, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Parse {
        origin: origin.to_string(),
        source,
    })
}

pub fn read_entries(path: &Path) -> Result<Vec<RawEntry>, DataError> {
    let json = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(&json, &path.display().to_string())
}

/// Reads each collection from its override path, or from the data bundled
/// into the binary when no override is given.
pub fn load(blocks: Option<&Path>, patterns: Option<&Path>) -> Result<RawCatalog, DataError> {
    let blocks = match blocks {
        Some(path) => read_entries(path)?,
        None => parse_entries(BUNDLED_BLOCKS, "bundled blocks.json")?,
    };
    let patterns = match patterns {
        Some(path) => read_entries(path)?,
        None => parse_entries(BUNDLED_PATTERNS, "bundled patterns.json")?,
    };
    tracing::debug!(
        blocks = blocks.len(),
        patterns = patterns.len(),
        "raw catalog data read"
    );
    Ok(RawCatalog { blocks, patterns })
}
