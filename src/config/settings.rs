//! Resolved run configuration
//!
//! Values come from, in order of precedence: command-line flags, CI
//! environment variables, `.gates-diff.toml`, built-in defaults. The commit,
//! head branch and repository finally fall back to local git metadata.

use super::file::ConfigFile;
use crate::diff::SummaryQuantile;
use crate::git::GitRepository;
use crate::infra::CommandExecutor;
use crate::store::DEFAULT_STORE_DIR;
use anyhow::Result;
use std::path::PathBuf;

/// Default report file name
pub const DEFAULT_REPORT: &str = "gates_report.json";

/// Default Markdown title line
pub const DEFAULT_HEADER: &str = "# Changes to circuit sizes";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct DiffOverrides {
    /// Current report path
    pub report: Option<PathBuf>,
    /// Explicit reference report path
    pub reference: Option<PathBuf>,
    /// Markdown title line
    pub header: Option<String>,
    /// Summary quantile
    pub quantile: Option<f64>,
    /// Base branch
    pub base: Option<String>,
    /// Head branch
    pub head: Option<String>,
    /// GitHub `owner/name`
    pub repository: Option<String>,
    /// Current commit
    pub commit: Option<String>,
    /// Reference store directory
    pub store_dir: Option<PathBuf>,
    /// File receiving the Markdown report
    pub markdown_out: Option<PathBuf>,
    /// Print JSON instead of tables
    pub json: bool,
    /// Show contract tables instead of program tables
    pub contracts: bool,
    /// Skip storing the current report
    pub no_upload: bool,
}

/// GitHub Actions variables, read once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnvironment {
    /// `GITHUB_REPOSITORY`
    pub repository: Option<String>,
    /// `GITHUB_SHA`
    pub sha: Option<String>,
    /// `GITHUB_BASE_REF`
    pub base_ref: Option<String>,
    /// `GITHUB_HEAD_REF`, or `GITHUB_REF_NAME` outside pull requests
    pub head_ref: Option<String>,
    /// `GITHUB_OUTPUT`
    pub output: Option<PathBuf>,
}

impl CiEnvironment {
    /// Read the variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the variables through a lookup function; empty values count as unset
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::config::CiEnvironment;
    ///
    /// let env = CiEnvironment::from_lookup(|key| match key {
    ///     "GITHUB_HEAD_REF" => Some(String::new()),
    ///     "GITHUB_REF_NAME" => Some("main".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(env.head_ref.as_deref(), Some("main"));
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            repository: var("GITHUB_REPOSITORY"),
            sha: var("GITHUB_SHA"),
            base_ref: var("GITHUB_BASE_REF"),
            head_ref: var("GITHUB_HEAD_REF").or_else(|| var("GITHUB_REF_NAME")),
            output: var("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }
}

/// Fully resolved configuration of one `diff` run
#[derive(Debug, Clone, PartialEq)]
pub struct DiffConfig {
    /// Current report path
    pub report: PathBuf,
    /// Explicit reference report path, bypassing the store
    pub reference: Option<PathBuf>,
    /// Markdown title line
    pub header: String,
    /// Summary quantile
    pub quantile: SummaryQuantile,
    /// Branch whose stored report is the reference
    pub base_branch: Option<String>,
    /// Branch the current report is stored under
    pub head_branch: Option<String>,
    /// GitHub `owner/name`
    pub repository: Option<String>,
    /// Current commit
    pub commit_hash: Option<String>,
    /// Reference store directory
    pub store_dir: PathBuf,
    /// File receiving the Markdown report
    pub markdown_out: Option<PathBuf>,
    /// GitHub Actions output file
    pub github_output: Option<PathBuf>,
    /// Print JSON instead of tables
    pub json: bool,
    /// Show contract tables instead of program tables
    pub contracts: bool,
    /// Store the current report for later runs
    pub upload: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            report: PathBuf::from(DEFAULT_REPORT),
            reference: None,
            header: DEFAULT_HEADER.to_string(),
            quantile: SummaryQuantile::default(),
            base_branch: None,
            head_branch: None,
            repository: None,
            commit_hash: None,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            markdown_out: None,
            github_output: None,
            json: false,
            contracts: false,
            upload: true,
        }
    }
}

fn git_value<E: std::fmt::Display>(
    what: &str,
    lookup: impl FnOnce() -> Result<Option<String>, E>,
) -> Option<String> {
    match lookup() {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Could not read {} from git: {}", what, e);
            None
        }
    }
}

impl DiffConfig {
    /// Merge all configuration sources
    pub fn resolve<CE: CommandExecutor>(
        overrides: DiffOverrides,
        env: CiEnvironment,
        file: ConfigFile,
        git: &GitRepository<CE>,
    ) -> Result<Self> {
        let defaults = Self::default();

        let quantile = match overrides.quantile.or(file.summary_quantile) {
            Some(value) => SummaryQuantile::new(value)?,
            None => defaults.quantile,
        };

        let commit_hash = overrides
            .commit
            .or(env.sha)
            .or_else(|| git_value("commit", || git.get_commit_hash()));

        let head_branch = overrides.head.or(env.head_ref).or_else(|| {
            git_value("branch", || git.get_branch_name()).filter(|branch| branch != "HEAD")
        });

        let repository = overrides
            .repository
            .or(env.repository)
            .or(file.repository)
            .or_else(|| git_value("origin remote", || git.get_origin_repository()));

        Ok(Self {
            report: overrides.report.or(file.report).unwrap_or(defaults.report),
            reference: overrides.reference,
            header: overrides.header.or(file.header).unwrap_or(defaults.header),
            quantile,
            base_branch: overrides.base.or(env.base_ref),
            head_branch,
            repository,
            commit_hash,
            store_dir: overrides
                .store_dir
                .or(file.store_dir)
                .unwrap_or(defaults.store_dir),
            markdown_out: overrides.markdown_out,
            github_output: env.output,
            json: overrides.json,
            contracts: overrides.contracts,
            upload: !overrides.no_upload,
        })
    }

    /// File name used for stored artifacts of the current report
    pub fn report_file_name(&self) -> String {
        self.report
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_REPORT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatesDiffError;
    use crate::infra::mock_exit_status;
    use std::collections::HashMap;
    use std::process::{Command, Output};

    // Answers git queries from a table keyed by the first argument pair
    struct MockGit {
        answers: HashMap<&'static str, &'static str>,
    }

    impl CommandExecutor for MockGit {
        fn output(&self, cmd: &mut Command) -> std::io::Result<Output> {
            let args: Vec<String> = cmd
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            let key = args.join(" ");

            Ok(match self.answers.get(key.as_str()) {
                Some(stdout) => Output {
                    status: mock_exit_status(0),
                    stdout: format!("{}\n", stdout).into_bytes(),
                    stderr: vec![],
                },
                None => Output {
                    status: mock_exit_status(128),
                    stdout: vec![],
                    stderr: b"fatal: not a git repository".to_vec(),
                },
            })
        }
    }

    fn git(answers: &[(&'static str, &'static str)]) -> GitRepository<MockGit> {
        GitRepository::with_executor(MockGit {
            answers: answers.iter().copied().collect(),
        })
    }

    fn no_git() -> GitRepository<MockGit> {
        git(&[])
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let config = DiffConfig::resolve(
            DiffOverrides::default(),
            CiEnvironment::default(),
            ConfigFile::default(),
            &no_git(),
        )
        .unwrap();

        assert_eq!(config, DiffConfig::default());
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let overrides = DiffOverrides {
            repository: Some("cli/repo".to_string()),
            quantile: Some(0.5),
            ..Default::default()
        };
        let env = CiEnvironment {
            repository: Some("env/repo".to_string()),
            sha: Some("envsha".to_string()),
            ..Default::default()
        };
        let file = ConfigFile {
            repository: Some("file/repo".to_string()),
            summary_quantile: Some(0.9),
            header: Some("# From file".to_string()),
            ..Default::default()
        };

        let config = DiffConfig::resolve(overrides, env, file, &no_git()).unwrap();

        assert_eq!(config.repository.as_deref(), Some("cli/repo"));
        assert_eq!(config.quantile.value(), 0.5);
        assert_eq!(config.commit_hash.as_deref(), Some("envsha"));
        assert_eq!(config.header, "# From file");
    }

    #[test]
    fn test_git_fills_missing_metadata() {
        let repo = git(&[
            ("rev-parse HEAD", "0123abcd"),
            ("rev-parse --abbrev-ref HEAD", "feature/x"),
            ("remote get-url origin", "https://github.com/owner/name.git"),
        ]);

        let config = DiffConfig::resolve(
            DiffOverrides::default(),
            CiEnvironment::default(),
            ConfigFile::default(),
            &repo,
        )
        .unwrap();

        assert_eq!(config.commit_hash.as_deref(), Some("0123abcd"));
        assert_eq!(config.head_branch.as_deref(), Some("feature/x"));
        assert_eq!(config.repository.as_deref(), Some("owner/name"));
    }

    #[test]
    fn test_detached_head_is_not_a_branch() {
        let repo = git(&[("rev-parse --abbrev-ref HEAD", "HEAD")]);

        let config = DiffConfig::resolve(
            DiffOverrides::default(),
            CiEnvironment::default(),
            ConfigFile::default(),
            &repo,
        )
        .unwrap();

        assert!(config.head_branch.is_none());
    }

    #[test]
    fn test_invalid_cli_quantile_is_rejected() {
        let overrides = DiffOverrides {
            quantile: Some(4.0),
            ..Default::default()
        };

        let err = DiffConfig::resolve(
            overrides,
            CiEnvironment::default(),
            ConfigFile::default(),
            &no_git(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatesDiffError>(),
            Some(GatesDiffError::InvalidQuantile { .. })
        ));
    }

    #[test]
    fn test_flags_map_to_config() {
        let overrides = DiffOverrides {
            no_upload: true,
            json: true,
            contracts: true,
            report: Some(PathBuf::from("out/report.json")),
            ..Default::default()
        };
        let env = CiEnvironment {
            output: Some(PathBuf::from("/tmp/gh_output")),
            base_ref: Some("main".to_string()),
            ..Default::default()
        };

        let config =
            DiffConfig::resolve(overrides, env, ConfigFile::default(), &no_git()).unwrap();

        assert!(!config.upload);
        assert!(config.json);
        assert!(config.contracts);
        assert_eq!(config.base_branch.as_deref(), Some("main"));
        assert_eq!(config.github_output, Some(PathBuf::from("/tmp/gh_output")));
        assert_eq!(config.report_file_name(), "report.json");
    }

    #[test]
    fn test_ci_environment_ignores_empty_values() {
        let env = CiEnvironment::from_lookup(|key| match key {
            "GITHUB_SHA" => Some("  ".to_string()),
            "GITHUB_HEAD_REF" => Some("feat".to_string()),
            "GITHUB_REF_NAME" => Some("refs-name".to_string()),
            _ => None,
        });

        assert!(env.sha.is_none());
        assert_eq!(env.head_ref.as_deref(), Some("feat"));
    }
}
