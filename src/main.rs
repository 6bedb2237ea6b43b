use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use std::process;

use gates_diff::cmd;
use gates_diff::config::{CiEnvironment, ConfigLoader, DiffConfig, DiffOverrides};
use gates_diff::error::ErrorFormatter;
use gates_diff::git::GitRepository;

/// Circuit size diff reports
///
/// gates-diff compares the gates report of the current commit with the one
/// stored for the base branch, and renders the changes for the console, as
/// Markdown and as GitHub Actions outputs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the current report with the reference report
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct DiffArgs {
    /// Current report file [default: gates_report.json]
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Reference report file, bypassing the report store
    #[arg(long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Markdown title line
    #[arg(long)]
    header: Option<String>,

    /// Quantile of the most significant diffs shown in the summary [default: 0.8]
    #[arg(short, long)]
    quantile: Option<f64>,

    /// Branch whose stored report is the reference
    #[arg(long)]
    base: Option<String>,

    /// Branch the current report is stored under
    #[arg(long)]
    head: Option<String>,

    /// GitHub repository (owner/name) for commit links
    #[arg(long)]
    repository: Option<String>,

    /// Commit the current report was generated at
    #[arg(long)]
    commit: Option<String>,

    /// Directory of stored reports
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Write the Markdown report to this file
    #[arg(long, value_name = "FILE")]
    markdown_out: Option<PathBuf>,

    /// Show contract tables instead of program tables
    #[arg(long)]
    contracts: bool,

    /// Output as JSON (for CI/CD integration)
    #[arg(long)]
    json: bool,

    /// Don't store the current report
    #[arg(long)]
    no_upload: bool,
}

impl From<DiffArgs> for DiffOverrides {
    fn from(args: DiffArgs) -> Self {
        Self {
            report: args.report,
            reference: args.reference,
            header: args.header,
            quantile: args.quantile,
            base: args.base,
            head: args.head,
            repository: args.repository,
            commit: args.commit,
            store_dir: args.store_dir,
            markdown_out: args.markdown_out,
            json: args.json,
            contracts: args.contracts,
            no_upload: args.no_upload,
        }
    }
}

fn run_diff(args: DiffArgs) -> anyhow::Result<()> {
    let file = ConfigLoader::load(Path::new("."))?;
    let config = DiffConfig::resolve(
        args.into(),
        CiEnvironment::from_env(),
        file,
        &GitRepository::new(),
    )?;
    log::debug!("Resolved configuration: {:?}", config);

    cmd::cmd_diff(&config)
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        gates_diff::fmt::set_emoji_enabled(false);
    }

    let result = match cli.command {
        Some(Commands::Diff(args)) => run_diff(args),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("gates-diff v{}", env!("CARGO_PKG_VERSION"));
            println!("Circuit size diff reports\n");
            println!("Usage: gates-diff <COMMAND>\n");
            println!("Commands:");
            println!("  diff         Compare the current report with the reference report");
            println!("  completions  Generate shell completions");
            println!("\nRun 'gates-diff <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
