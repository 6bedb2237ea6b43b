//! GitHub Actions step outputs

use crate::error::GatesDiffError;
use crate::infra::FileSystem;
use anyhow::Result;
use std::path::PathBuf;

const DELIMITER: &str = "GATES_DIFF_EOF";

/// Writer of multi-line step outputs to the `GITHUB_OUTPUT` file
pub struct GithubOutput<FS: FileSystem> {
    path: PathBuf,
    fs: FS,
}

/// Heredoc delimiter that does not occur in `value`
fn delimiter_for(value: &str) -> String {
    let mut delimiter = DELIMITER.to_string();
    let mut counter = 0;
    while value.lines().any(|line| line == delimiter) {
        counter += 1;
        delimiter = format!("{}_{}", DELIMITER, counter);
    }
    delimiter
}

/// Encode one output entry with the heredoc syntax
///
/// # Examples
///
/// ```
/// use gates_diff::cicd::github::encode_output;
///
/// assert_eq!(
///     encode_output("shell", "a\nb"),
///     "shell<<GATES_DIFF_EOF\na\nb\nGATES_DIFF_EOF\n"
/// );
/// ```
pub fn encode_output(name: &str, value: &str) -> String {
    let delimiter = delimiter_for(value);
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}

impl<FS: FileSystem> GithubOutput<FS> {
    /// Create a writer appending to `path`
    pub fn new(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// Append one output
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.fs
            .append(&self.path, encode_output(name, value))
            .map_err(|source| GatesDiffError::Io {
                context: format!("writing output '{}' to {}", name, self.path.display()),
                source,
            })?;

        log::debug!("Set output '{}' ({} bytes)", name, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RealFileSystem;
    use tempfile::TempDir;

    #[test]
    fn test_set_appends_heredoc_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("github_output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let output = GithubOutput::new(&path, RealFileSystem);
        output.set("shell", "line 1\nline 2").unwrap();
        output.set("markdown", "# Title").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "existing=1\n\
             shell<<GATES_DIFF_EOF\nline 1\nline 2\nGATES_DIFF_EOF\n\
             markdown<<GATES_DIFF_EOF\n# Title\nGATES_DIFF_EOF\n"
        );
    }

    #[test]
    fn test_delimiter_avoids_collisions() {
        let value = "GATES_DIFF_EOF\nGATES_DIFF_EOF_1";
        let encoded = encode_output("x", value);

        assert!(encoded.starts_with("x<<GATES_DIFF_EOF_2\n"));
        assert!(encoded.ends_with("\nGATES_DIFF_EOF_2\n"));
    }

    #[test]
    fn test_delimiter_inside_a_line_is_not_a_collision() {
        assert_eq!(delimiter_for("text GATES_DIFF_EOF text"), DELIMITER);
    }

    #[test]
    fn test_set_reports_unwritable_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = GithubOutput::new(temp_dir.path().join("missing/dir/out"), RealFileSystem);

        let err = output.set("shell", "x").unwrap_err();
        assert!(err.to_string().contains("writing output 'shell'"));
    }
}
