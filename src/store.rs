//! Result store: snapshot files on disk, grouped by test identity
//!
//! Layout: `<root>/<client>/<test>/*.json`. Listing is ordered most recent
//! first by modification time, falling back to file name (descending) so names
//! with an embedded creation order break ties correctly.

use crate::error::{CompareError, Result};
use crate::snapshot::SnapshotEntry;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// (client, test) pair naming a series of snapshots
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestIdentity {
    pub client: String,
    pub test: String,
}

impl TestIdentity {
    /// Create an identity, rejecting empty or path-like components
    pub fn new(client: impl Into<String>, test: impl Into<String>) -> Result<Self> {
        let identity = Self {
            client: client.into(),
            test: test.into(),
        };
        validate_component("client", &identity.client)?;
        validate_component("test", &identity.test)?;
        Ok(identity)
    }

    /// Relative directory for this identity
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(&self.client).join(&self.test)
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.client, self.test)
    }
}

fn validate_component(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CompareError::config(format!("missing required {field} name")));
    }
    if trimmed == "." || trimmed == ".." || value.contains(['/', '\\']) {
        return Err(CompareError::config(format!(
            "invalid {field} name '{value}': must be a single path component"
        )));
    }
    Ok(())
}

/// Directory-backed store of snapshot files
#[derive(Debug, Clone)]
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the snapshots of `identity`
    pub fn dir(&self, identity: &TestIdentity) -> PathBuf {
        self.root.join(identity.relative_dir())
    }

    /// All snapshots for `identity`, most recent first
    ///
    /// # Errors
    /// `NoHistory` when the directory is missing or holds no JSON files;
    /// `FileRead` when the directory cannot be listed.
    pub fn list(&self, identity: &TestIdentity) -> Result<Vec<SnapshotEntry>> {
        let dir = self.dir(identity);
        if !dir.is_dir() {
            tracing::debug!("No result directory at {}", dir.display());
            return Err(CompareError::NoHistory {
                identity: identity.to_string(),
            });
        }

        let read_err = |source: std::io::Error| CompareError::FileRead {
            path: dir.clone(),
            source,
        };

        let mut entries = Vec::new();
        for item in fs::read_dir(&dir).map_err(read_err)? {
            let item = item.map_err(read_err)?;
            let path = item.path();
            if !is_snapshot_file(&path) {
                continue;
            }
            let metadata = item.metadata().map_err(read_err)?;
            if !metadata.is_file() {
                continue;
            }
            let modified = match metadata.modified() {
                Ok(time) => DateTime::<Utc>::from(time),
                Err(e) => {
                    tracing::warn!("No modification time for {}: {}", path.display(), e);
                    DateTime::<Utc>::from(std::time::UNIX_EPOCH)
                }
            };
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping non UTF-8 file name in {}", dir.display());
                continue;
            };
            entries.push(SnapshotEntry {
                name: name.to_string(),
                path: path.clone(),
                modified,
            });
        }

        sort_most_recent_first(&mut entries);

        if entries.is_empty() {
            return Err(CompareError::NoHistory {
                identity: identity.to_string(),
            });
        }

        tracing::debug!("Found {} snapshots for {}", entries.len(), identity);
        Ok(entries)
    }
}

fn is_snapshot_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Order by modification time, then name, both descending
pub fn sort_most_recent_first(entries: &mut [SnapshotEntry]) {
    entries.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.name.cmp(&a.name))
    });
}
