//! Reference report storage
//!
//! Every run stores its report under the head branch so that later runs on
//! branches based on it can find a reference. Reports are stored as
//! `<escaped-branch>.<report-file-name>` next to a `.meta.json` sidecar
//! recording the commit they were generated at.

use crate::infra::FileSystem;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Default store location, relative to the project root
pub const DEFAULT_STORE_DIR: &str = ".gates-diff/artifacts";

const META_SUFFIX: &str = ".meta.json";

/// Reference store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Artifact could not be written
    #[error("failed to store artifact '{artifact}'")]
    Write {
        /// Artifact name
        artifact: String,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// Artifact exists but could not be read
    #[error("failed to read artifact '{artifact}'")]
    Read {
        /// Artifact name
        artifact: String,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// Artifact metadata could not be encoded or decoded
    #[error("invalid metadata for artifact '{artifact}'")]
    Metadata {
        /// Artifact name
        artifact: String,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },
}

/// Replace path separators in a branch name so it can prefix a file name
///
/// # Examples
///
/// ```
/// use gates_diff::store::escape_branch;
///
/// assert_eq!(escape_branch("feature/gates\\diff"), "feature-gates-diff");
/// assert_eq!(escape_branch("main"), "main");
/// ```
pub fn escape_branch(branch: &str) -> String {
    branch.replace(['/', '\\'], "-")
}

/// Artifact name of a report file stored for a branch
///
/// # Examples
///
/// ```
/// use gates_diff::store::artifact_name;
///
/// assert_eq!(artifact_name("feat/x", "gates_report.json"), "feat-x.gates_report.json");
/// ```
pub fn artifact_name(branch: &str, report_file_name: &str) -> String {
    format!("{}.{}", escape_branch(branch), report_file_name)
}

/// Metadata recorded next to each stored report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Branch the report was stored for
    pub branch: String,
    /// Commit the report was generated at
    pub commit_hash: Option<String>,
    /// Unix timestamp of the upload
    pub timestamp: u64,
}

/// A report fetched from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    /// Artifact name the report was found under
    pub artifact_name: String,
    /// Raw report content
    pub content: String,
    /// Upload metadata, if the sidecar exists
    pub meta: Option<ArtifactMeta>,
}

impl StoredReport {
    /// Commit the stored report was generated at
    pub fn commit_hash(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.commit_hash.as_deref())
    }

    /// Unix timestamp the report was stored at
    pub fn uploaded_at(&self) -> Option<u64> {
        self.meta.as_ref().map(|m| m.timestamp)
    }
}

/// Storage of reports keyed by branch
pub trait ReferenceStore {
    /// Store a report for `branch` and return its artifact name
    fn save(
        &self,
        branch: &str,
        report_file_name: &str,
        content: &str,
        commit_hash: Option<&str>,
    ) -> Result<String, StoreError>;

    /// Fetch the report stored for `branch`, if any
    fn load(&self, branch: &str, report_file_name: &str)
        -> Result<Option<StoredReport>, StoreError>;
}

/// Reference store backed by a local directory
pub struct LocalReferenceStore<FS: FileSystem> {
    dir: PathBuf,
    fs: FS,
}

impl<FS: FileSystem> LocalReferenceStore<FS> {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    /// Directory holding the artifacts
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn artifact_path(&self, artifact: &str) -> PathBuf {
        self.dir.join(artifact)
    }

    fn meta_path(&self, artifact: &str) -> PathBuf {
        self.dir.join(format!("{}{}", artifact, META_SUFFIX))
    }

    fn read_optional(&self, path: &Path, artifact: &str) -> Result<Option<String>, StoreError> {
        match self.fs.read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                artifact: artifact.to_string(),
                source,
            }),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl<FS: FileSystem> ReferenceStore for LocalReferenceStore<FS> {
    fn save(
        &self,
        branch: &str,
        report_file_name: &str,
        content: &str,
        commit_hash: Option<&str>,
    ) -> Result<String, StoreError> {
        let artifact = artifact_name(branch, report_file_name);
        let write_error = |source| StoreError::Write {
            artifact: artifact.clone(),
            source,
        };

        self.fs.create_dir_all(&self.dir).map_err(write_error)?;

        let meta = ArtifactMeta {
            branch: branch.to_string(),
            commit_hash: commit_hash.map(str::to_string),
            timestamp: unix_now(),
        };
        let meta_json =
            serde_json::to_string_pretty(&meta).map_err(|source| StoreError::Metadata {
                artifact: artifact.clone(),
                source,
            })?;

        self.fs
            .write(&self.artifact_path(&artifact), content)
            .map_err(write_error)?;
        self.fs
            .write(&self.meta_path(&artifact), meta_json)
            .map_err(write_error)?;

        log::debug!("Stored {} in {}", artifact, self.dir.display());
        Ok(artifact)
    }

    fn load(
        &self,
        branch: &str,
        report_file_name: &str,
    ) -> Result<Option<StoredReport>, StoreError> {
        let artifact = artifact_name(branch, report_file_name);

        let Some(content) = self.read_optional(&self.artifact_path(&artifact), &artifact)? else {
            return Ok(None);
        };

        let meta = match self.read_optional(&self.meta_path(&artifact), &artifact)? {
            Some(json) => Some(serde_json::from_str::<ArtifactMeta>(&json).map_err(|source| {
                StoreError::Metadata {
                    artifact: artifact.clone(),
                    source,
                }
            })?),
            None => {
                log::warn!("Artifact '{}' has no metadata sidecar", artifact);
                None
            }
        };

        Ok(Some(StoredReport {
            artifact_name: artifact,
            content,
            meta,
        }))
    }
}
