mod demo;
mod parser;

pub use demo::demo_catalog;

use crate::workflows::matchmaking::domain::Candidate;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read candidate catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid candidate catalog CSV: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Read-only source of candidates. Implementations return only eligible records and
/// are re-read whenever a session starts over.
pub trait CandidateCatalog {
    fn eligible_candidates(&self) -> Result<Vec<Candidate>, CatalogError>;
}

impl<T: CandidateCatalog + ?Sized> CandidateCatalog for &T {
    fn eligible_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        (**self).eligible_candidates()
    }
}

/// In-memory catalog; ineligible records are dropped on read.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    candidates: Vec<Candidate>,
}

impl StaticCatalog {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn demo() -> Self {
        Self::new(demo_catalog())
    }
}

impl CandidateCatalog for StaticCatalog {
    fn eligible_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| candidate.eligible)
            .cloned()
            .collect())
    }
}

/// CSV export with `id,name,indications,technology,eligible` columns, read on every call.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Candidate>, CatalogError> {
        let candidates = parser::parse_candidates(reader)?;
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.eligible)
            .collect())
    }
}

impl CandidateCatalog for CsvCatalog {
    fn eligible_candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        let file = std::fs::File::open(&self.path)?;
        let candidates = Self::from_reader(file)?;
        tracing::debug!(path = %self.path.display(), eligible = candidates.len(), "catalog loaded");
        Ok(candidates)
    }
}
