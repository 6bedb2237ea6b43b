//! Git metadata lookups used when CI variables are absent

use crate::infra::{CommandExecutor, RealCommandExecutor};
use thiserror::Error;

/// Git operation errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command failed with an error message
    #[error("Git command failed: {0}")]
    CommandFailed(String),

    /// Git output contained invalid UTF-8
    #[error("Invalid UTF-8 in git output")]
    InvalidUtf8,

    /// IO error occurred while executing git command
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Git repository interface with dependency injection for testability
pub struct GitRepository<CE: CommandExecutor = RealCommandExecutor> {
    cmd_executor: CE,
}

impl GitRepository<RealCommandExecutor> {
    /// Create a new GitRepository with real command execution
    pub fn new() -> Self {
        Self {
            cmd_executor: RealCommandExecutor,
        }
    }
}

impl Default for GitRepository<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CE: CommandExecutor> GitRepository<CE> {
    /// Create a GitRepository with a custom command executor (for testing)
    pub fn with_executor(cmd_executor: CE) -> Self {
        Self { cmd_executor }
    }

    /// Run git and return its trimmed stdout
    ///
    /// `Ok(None)` when git is not installed, the directory is not a
    /// repository, or HEAD has no commit yet.
    fn query(&self, args: &[&str]) -> Result<Option<String>, GitError> {
        let output = match self.cmd_executor.execute(|cmd| cmd.args(args), "git") {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GitError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository")
                || stderr.contains("unknown revision")
                || stderr.contains("No such remote")
            {
                return Ok(None);
            }
            return Err(GitError::CommandFailed(stderr.trim().to_string()));
        }

        let value = String::from_utf8(output.stdout)
            .map_err(|_| GitError::InvalidUtf8)?
            .trim()
            .to_string();

        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    /// Get the full hash of the current commit
    pub fn get_commit_hash(&self) -> Result<Option<String>, GitError> {
        self.query(&["rev-parse", "HEAD"])
    }

    /// Get current git branch name (`HEAD` when detached)
    pub fn get_branch_name(&self) -> Result<Option<String>, GitError> {
        self.query(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Get the `owner/name` slug of the `origin` remote, if it is hosted on GitHub
    pub fn get_origin_repository(&self) -> Result<Option<String>, GitError> {
        Ok(self
            .query(&["remote", "get-url", "origin"])?
            .and_then(|url| github_slug(&url)))
    }
}

/// Extract `owner/name` from a GitHub remote URL
///
/// # Examples
///
/// ```
/// use gates_diff::git::github_slug;
///
/// assert_eq!(github_slug("git@github.com:noir-lang/noir.git").as_deref(), Some("noir-lang/noir"));
/// assert_eq!(github_slug("https://github.com/noir-lang/noir").as_deref(), Some("noir-lang/noir"));
/// assert_eq!(github_slug("https://gitlab.com/a/b.git"), None);
/// ```
pub fn github_slug(url: &str) -> Option<String> {
    let path = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("https://github.com/"))
        .or_else(|| url.strip_prefix("ssh://git@github.com/"))?;
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Some(format!("{}/{}", owner, name))
        }
        _ => None,
    }
}
