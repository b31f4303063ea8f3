//! Job Catalog — read-only collection of job postings loaded from a JSON file.
//!
//! The live catalog is held by `CatalogStore` as an `Arc<JobCatalog>` snapshot.
//! Readers clone the `Arc` and never observe a partially reloaded catalog.

pub mod finder;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read job catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("job catalog at {path} is not a JSON array of postings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("job catalog lock poisoned")]
    Poisoned,
}

/// A single job posting. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
}

/// An immutable, ordered set of postings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCatalog {
    postings: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads and parses a catalog file. The file's top-level value must be an
    /// array of `{ title, company, description }` objects.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let postings: Vec<JobPosting> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(postings))
    }

    /// Like `load`, but degrades to an empty catalog when the file is unusable.
    pub async fn load_or_empty(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(catalog) => {
                info!("Loaded {} job postings from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                warn!("{e}; continuing with an empty job catalog");
                Self::empty()
            }
        }
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Anything the workflow can pull a catalog snapshot from.
pub trait JobSource: Send + Sync {
    fn snapshot(&self) -> Result<Arc<JobCatalog>, CatalogError>;
}

/// Holds the current catalog snapshot and swaps it atomically on reload.
pub struct CatalogStore {
    path: PathBuf,
    current: RwLock<Arc<JobCatalog>>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>, catalog: JobCatalog) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Loads the catalog at `path`, starting empty if it cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let catalog = JobCatalog::load_or_empty(&path).await;
        Self::new(path, catalog)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the catalog file. The new snapshot is fully parsed before the
    /// write lock is taken; on failure the previous snapshot stays in place.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let fresh = Arc::new(JobCatalog::load(&self.path).await?);
        let count = fresh.len();

        let mut current = self.current.write().map_err(|_| CatalogError::Poisoned)?;
        *current = fresh;

        info!("Reloaded job catalog: {count} postings");
        Ok(count)
    }
}

impl JobSource for CatalogStore {
    fn snapshot(&self) -> Result<Arc<JobCatalog>, CatalogError> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| CatalogError::Poisoned)
    }
}

#[cfg(test)]
pub(crate) fn posting(title: &str, company: &str, description: &str) -> JobPosting {
    JobPosting {
        title: title.to_string(),
        company: company.to_string(),
        description: description.to_string(),
    }
}
