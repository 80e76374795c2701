//! gotocommit - pick a commit by revision expression, tag, or branch

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use gotocommit::clipboard::{ClipboardSource, NoClipboard, SystemClipboard};
use gotocommit::{
    Config, DialogOutcome, Error, GitRepository, GoToCommitDialog, RefEntry, RefLister, selector,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Resolve a revision expression, tag, or branch to a commit id
#[derive(Parser)]
#[command(name = "gotocommit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to work in (defaults to the current directory)
    #[arg(long, short = 'C', global = true)]
    repo: Option<PathBuf>,

    /// Configuration file (defaults to the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not pre-fill the expression from the clipboard
    #[arg(long)]
    no_clipboard: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an expression without opening the dialog
    Resolve {
        /// Any revision `git rev-parse` understands
        expression: String,
    },
    /// List tags, newest first
    Tags {
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// List local and remote branches
    Branches {
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config, using defaults: {e:#}");
            Config::default()
        }),
    };

    let repo_path = match &cli.repo {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let repo = Arc::new(GitRepository::discover(&repo_path)?);
    debug!(root = %repo.root().display(), "Repository opened");

    match cli.command {
        Some(Commands::Resolve { expression }) => cmd_resolve(&repo, &expression),
        Some(Commands::Tags { json }) => cmd_list(&repo.list_tags()?, json),
        Some(Commands::Branches { json }) => cmd_list(&repo.list_branches()?, json),
        None => cmd_dialog(repo, &config, cli.no_clipboard),
    }
}

/// Log to the temp dir; tail with `tail -f $TMPDIR/gotocommit.log`
///
/// `DEBUG=0-3` sets verbosity (0=off, 1=warn, 2=info, 3=debug); `RUST_LOG`
/// takes precedence when set.
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);
    let rust_log = std::env::var_os("RUST_LOG").is_some();
    if debug_level == 0 && !rust_log {
        return;
    }

    let default_level = match debug_level {
        0 | 1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_path = gotocommit::paths::log_path();
    let dir = log_path.parent().map_or_else(std::env::temp_dir, Path::to_path_buf);
    let file_name = log_path
        .file_name()
        .map_or_else(|| "gotocommit.log".into(), ToOwned::to_owned);

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
}

fn cmd_resolve(repo: &GitRepository, expression: &str) -> Result<ExitCode> {
    match selector::resolve(repo, expression) {
        Ok(id) => {
            println!("{id}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ Error::RevisionNotFound { .. }) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_list(entries: &[RefEntry], json: bool) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, entries).context("Failed to write JSON")?;
        writeln!(stdout)?;
    } else {
        for entry in entries {
            writeln!(stdout, "{}\t{}", entry.name, entry.commit_id)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_dialog(repo: Arc<GitRepository>, config: &Config, no_clipboard: bool) -> Result<ExitCode> {
    let clipboard: Box<dyn ClipboardSource> = if no_clipboard {
        Box::new(NoClipboard)
    } else {
        Box::new(SystemClipboard)
    };

    let dialog = GoToCommitDialog::open(repo.clone(), repo, clipboard.as_ref(), config);
    let outcome = gotocommit::tui::run(dialog, config)?;
    let selected = report_outcome(&outcome, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(if selected {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print the resolved id to `out`, or explain on `err` why there is none
///
/// Returns whether a revision was printed.
fn report_outcome(
    outcome: &DialogOutcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    if let Some(id) = outcome.revision() {
        writeln!(out, "{id}")?;
        return Ok(true);
    }
    if let DialogOutcome::Unresolved { candidate } = outcome {
        writeln!(err, "{}", Error::not_found(candidate.as_str()))?;
    }
    Ok(false)
}
