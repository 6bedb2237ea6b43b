//! Diff command implementation
//!
//! Handles the `gates-diff diff` command: stores the current report under the
//! head branch, fetches the base branch's report as reference, and renders
//! the size changes for the console, as Markdown and as GitHub outputs.

use anyhow::{Context, Result};
use console::style;

use crate::cicd::{GithubOutput, JsonOutput};
use crate::config::DiffConfig;
use crate::diff::{compute_workspace_diff, WorkspaceDiff};
use crate::error::GatesDiffError;
use crate::fmt::{INBOX, OUTBOX, SPARKLES, WARNING};
use crate::infra::{FileSystem, RealFileSystem};
use crate::render::{render_workspace, MarkdownContext, RenderedReport, ReportKind};
use crate::report::ReportLoader;
use crate::store::{LocalReferenceStore, ReferenceStore};

/// Where the reference report came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    /// Explicit `--reference` file
    File(String),
    /// Artifact stored for the base branch
    Stored(String),
    /// Nothing found; the current report was compared with itself
    Current,
}

/// Everything one diff run produced
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    /// All diffs between the two snapshots
    pub diff: WorkspaceDiff,
    /// Console and Markdown renderings
    pub report: RenderedReport,
    /// Artifact the current report was stored as
    pub uploaded: Option<String>,
    /// Origin of the reference report
    pub reference: ReferenceSource,
    /// Commit the reference report was generated at
    pub ref_commit_hash: Option<String>,
}

/// Main diff command handler (presentation layer)
///
/// # Examples
///
/// ```no_run
/// use gates_diff::cmd::diff::cmd_diff;
/// use gates_diff::config::DiffConfig;
///
/// let config = DiffConfig {
///     upload: false,
///     ..DiffConfig::default()
/// };
/// cmd_diff(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The current report (or an explicit reference) doesn't exist
/// - A report is not valid JSON or has a program without `main`
/// - The store or an output file can't be written
pub fn cmd_diff(config: &DiffConfig) -> Result<()> {
    let store = LocalReferenceStore::new(&config.store_dir, RealFileSystem);
    let outcome = run_diff_with(config, &RealFileSystem, &store)?;

    if let Some(artifact) = &outcome.uploaded {
        eprintln!(
            "{}Stored current report as {}",
            OUTBOX,
            style(artifact).cyan()
        );
    }
    match &outcome.reference {
        ReferenceSource::File(path) => eprintln!("{}Compared with {}", INBOX, style(path).cyan()),
        ReferenceSource::Stored(artifact) => {
            eprintln!("{}Compared with {}", INBOX, style(artifact).cyan())
        }
        ReferenceSource::Current => eprintln!(
            "{}{}",
            WARNING,
            style("No reference report found, comparing the current report with itself").yellow()
        ),
    }

    if config.json {
        JsonOutput::new(&outcome.diff, outcome.report.kind, config.quantile)
            .with_commits(
                config.commit_hash.as_deref(),
                outcome.ref_commit_hash.as_deref(),
            )
            .print();
    } else {
        println!("{}", outcome.report.shell);
    }

    if outcome.report.rows == 0 {
        eprintln!("{}No changes in circuit sizes", SPARKLES);
    }

    Ok(())
}

/// Run one comparison without printing
///
/// Stores the current report when `config.upload` is set and a head branch
/// is known, once it has parsed successfully. Then writes the Markdown file and GitHub outputs if configured.
pub fn run_diff_with<FS, S>(config: &DiffConfig, fs: &FS, store: &S) -> Result<DiffOutcome>
where
    FS: FileSystem + Clone,
    S: ReferenceStore,
{
    log::info!("Loading current report from {}", config.report.display());
    let current_content = ReportLoader::read_with_fs(&config.report, "current", fs)?;

    log::info!("Mapping current report");
    let current = ReportLoader::parse(&current_content, &config.report.display().to_string())?;
    log::debug!("Got {} current programs", current.programs.len());

    let uploaded = match (&config.head_branch, config.upload) {
        (Some(head), true) => {
            let artifact = store.save(
                head,
                &config.report_file_name(),
                &current_content,
                config.commit_hash.as_deref(),
            )?;
            log::info!("Stored current report as {}", artifact);
            Some(artifact)
        }
        _ => None,
    };

    let (reference_content, reference, ref_commit_hash) =
        load_reference(config, fs, store, &current_content)?;

    log::info!("Mapping reference report");
    let reference_report = match &reference {
        ReferenceSource::File(origin) | ReferenceSource::Stored(origin) => {
            ReportLoader::parse(&reference_content, origin)?
        }
        ReferenceSource::Current => current.clone(),
    };
    log::debug!("Got {} reference programs", reference_report.programs.len());

    log::info!("Computing diff");
    let diff = compute_workspace_diff(&reference_report, &current);
    let kind = ReportKind::detect(&reference_report);
    log::debug!(
        "{} circuit, {} Brillig and {} contract diffs ({:?} report)",
        diff.programs.len(),
        diff.unconstrained_functions.len(),
        diff.contracts.len(),
        kind
    );

    log::info!("Formatting diffs");
    let context = MarkdownContext {
        header: &config.header,
        repository: config.repository.as_deref(),
        commit_hash: config.commit_hash.as_deref(),
        ref_commit_hash: ref_commit_hash.as_deref(),
        quantile: config.quantile,
    };
    let report = render_workspace(&diff, kind, &context, config.contracts);

    write_outputs(config, fs, &report)?;

    Ok(DiffOutcome {
        diff,
        report,
        uploaded,
        reference,
        ref_commit_hash,
    })
}

fn load_reference<FS, S>(
    config: &DiffConfig,
    fs: &FS,
    store: &S,
    current_content: &str,
) -> Result<(String, ReferenceSource, Option<String>)>
where
    FS: FileSystem,
    S: ReferenceStore,
{
    if let Some(path) = &config.reference {
        log::info!("Loading reference report from {}", path.display());
        let content = ReportLoader::read_with_fs(path, "reference", fs)?;
        return Ok((
            content,
            ReferenceSource::File(path.display().to_string()),
            None,
        ));
    }

    if let Some(base) = &config.base_branch {
        log::info!("Searching reference report of branch {}", base);
        if let Some(stored) = store.load(base, &config.report_file_name())? {
            let commit = stored.commit_hash().map(str::to_string);
            log::info!(
                "Found artifact {} from commit {} (stored at {})",
                stored.artifact_name,
                commit.as_deref().unwrap_or("unknown"),
                stored
                    .uploaded_at()
                    .map_or_else(|| "unknown time".to_string(), |t| format!("unix time {}", t))
            );
            return Ok((
                stored.content,
                ReferenceSource::Stored(stored.artifact_name),
                commit,
            ));
        }
        log::warn!("No stored report found for branch {}", base);
    } else {
        log::warn!("No base branch given, skipping reference lookup");
    }

    Ok((current_content.to_string(), ReferenceSource::Current, None))
}

fn write_outputs<FS: FileSystem + Clone>(
    config: &DiffConfig,
    fs: &FS,
    report: &RenderedReport,
) -> Result<()> {
    if let Some(path) = &config.markdown_out {
        fs.write(path, &report.markdown)
            .map_err(|source| GatesDiffError::Io {
                context: format!("writing Markdown report to {}", path.display()),
                source,
            })?;
        log::info!("Wrote Markdown report to {}", path.display());
    }

    match &config.github_output {
        Some(path) if report.rows > 0 => {
            let output = GithubOutput::new(path, fs.clone());
            output.set("shell", &report.shell).context("Failed to set shell output")?;
            output
                .set("markdown", &report.markdown)
                .context("Failed to set markdown output")?;
        }
        Some(_) => log::debug!("No diffs, leaving GitHub outputs unset"),
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REPORT;
    use std::path::Path;
    use tempfile::TempDir;

    fn report_json(size: u64) -> String {
        format!(
            r#"{{
  "programs": [
    {{
      "package_name": "prog",
      "functions": [{{"name": "main", "opcodes": {0}, "circuit_size": {1}}}],
      "unconstrained_functions": []
    }}
  ],
  "contracts": []
}}"#,
            size,
            size * 10
        )
    }

    fn setup(size: u64) -> (TempDir, DiffConfig) {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join(DEFAULT_REPORT);
        std::fs::write(&report, report_json(size)).unwrap();

        let config = DiffConfig {
            report,
            store_dir: temp_dir.path().join("store"),
            header: "# Sizes".to_string(),
            ..DiffConfig::default()
        };
        (temp_dir, config)
    }

    fn store(dir: &Path) -> LocalReferenceStore<RealFileSystem> {
        LocalReferenceStore::new(dir, RealFileSystem)
    }

    #[test]
    fn test_no_reference_compares_report_with_itself() {
        let (_temp_dir, config) = setup(5);
        let outcome = run_diff_with(&config, &RealFileSystem, &store(&config.store_dir)).unwrap();

        assert_eq!(outcome.reference, ReferenceSource::Current);
        assert!(outcome.diff.is_empty());
        assert_eq!(outcome.report.rows, 0);
        assert!(outcome
            .report
            .markdown
            .contains("### There are no changes in circuit sizes"));
    }

    #[test]
    fn test_explicit_reference_file() {
        let (temp_dir, mut config) = setup(4);
        let reference = temp_dir.path().join("reference.json");
        std::fs::write(&reference, report_json(2)).unwrap();
        config.reference = Some(reference);
        config.upload = false;

        let outcome = run_diff_with(&config, &RealFileSystem, &store(&config.store_dir)).unwrap();

        assert!(matches!(outcome.reference, ReferenceSource::File(_)));
        assert_eq!(outcome.report.rows, 1);
        assert_eq!(outcome.diff.programs[0].opcodes.delta, 2);
        assert!(outcome.uploaded.is_none());
    }

    #[test]
    fn test_uploads_head_and_reads_base_from_store() {
        let (temp_dir, mut config) = setup(3);
        let store = store(&config.store_dir);
        store
            .save("main", DEFAULT_REPORT, &report_json(1), Some("base123"))
            .unwrap();

        config.base_branch = Some("main".to_string());
        config.head_branch = Some("feat/x".to_string());
        config.commit_hash = Some("head456".to_string());

        let outcome = run_diff_with(&config, &RealFileSystem, &store).unwrap();

        assert_eq!(outcome.uploaded.as_deref(), Some("feat-x.gates_report.json"));
        assert_eq!(
            outcome.reference,
            ReferenceSource::Stored("main.gates_report.json".to_string())
        );
        assert_eq!(outcome.ref_commit_hash.as_deref(), Some("base123"));
        assert!(outcome.report.markdown.contains("compared to commit: `base123`"));
        assert!(temp_dir
            .path()
            .join("store")
            .join("feat-x.gates_report.json")
            .exists());
    }

    #[test]
    fn test_writes_markdown_and_github_outputs() {
        let (temp_dir, mut config) = setup(8);
        let reference = temp_dir.path().join("reference.json");
        std::fs::write(&reference, report_json(4)).unwrap();
        config.reference = Some(reference);
        config.markdown_out = Some(temp_dir.path().join("report.md"));
        config.github_output = Some(temp_dir.path().join("github_output"));

        run_diff_with(&config, &RealFileSystem, &store(&config.store_dir)).unwrap();

        let markdown = std::fs::read_to_string(temp_dir.path().join("report.md")).unwrap();
        assert!(markdown.starts_with("# Sizes\n"));

        let outputs = std::fs::read_to_string(temp_dir.path().join("github_output")).unwrap();
        assert!(outputs.contains("shell<<GATES_DIFF_EOF\n"));
        assert!(outputs.contains("markdown<<GATES_DIFF_EOF\n# Sizes\n"));
    }

    #[test]
    fn test_github_outputs_unset_without_diffs() {
        let (temp_dir, mut config) = setup(8);
        config.github_output = Some(temp_dir.path().join("github_output"));

        run_diff_with(&config, &RealFileSystem, &store(&config.store_dir)).unwrap();

        assert!(!temp_dir.path().join("github_output").exists());
    }

    #[test]
    fn test_missing_current_report() {
        let (temp_dir, mut config) = setup(1);
        config.report = temp_dir.path().join("missing.json");

        let err = run_diff_with(&config, &RealFileSystem, &store(&config.store_dir)).unwrap_err();
        let gates_err = err.downcast_ref::<GatesDiffError>().unwrap();
        assert_eq!(gates_err.exit_code(), 66);
    }

    #[test]
    fn test_malformed_current_report_is_not_stored() {
        let (_temp_dir, mut config) = setup(1);
        std::fs::write(&config.report, "{ nope").unwrap();
        config.head_branch = Some("feat/x".to_string());
        let store = store(&config.store_dir);

        let err = run_diff_with(&config, &RealFileSystem, &store).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatesDiffError>(),
            Some(GatesDiffError::MalformedReport { .. })
        ));
        assert!(store.load("feat/x", DEFAULT_REPORT).unwrap().is_none());
    }

    #[test]
    fn test_current_report_without_main_is_not_stored() {
        let (_temp_dir, mut config) = setup(1);
        std::fs::write(
            &config.report,
            r#"{"programs": [{"package_name": "prog", "functions": []}], "contracts": []}"#,
        )
        .unwrap();
        config.head_branch = Some("main".to_string());
        let store = store(&config.store_dir);
        store
            .save("main", DEFAULT_REPORT, &report_json(2), Some("good"))
            .unwrap();

        let err = run_diff_with(&config, &RealFileSystem, &store).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatesDiffError>(),
            Some(GatesDiffError::MissingMainCircuit { .. })
        ));
        let kept = store.load("main", DEFAULT_REPORT).unwrap().unwrap();
        assert_eq!(kept.content, report_json(2));
        assert_eq!(kept.commit_hash(), Some("good"));
    }

    #[test]
    fn test_malformed_stored_reference() {
        let (_temp_dir, mut config) = setup(1);
        let store = store(&config.store_dir);
        store.save("main", DEFAULT_REPORT, "{ nope", None).unwrap();
        config.base_branch = Some("main".to_string());

        let err = run_diff_with(&config, &RealFileSystem, &store).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatesDiffError>(),
            Some(GatesDiffError::MalformedReport { .. })
        ));
    }
}
