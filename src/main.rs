//! gitscribe - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gitscribe::auth::TOKEN_ENV_VAR;
use gitscribe::commit::DEFAULT_TOKEN_LIMIT;
use gitscribe::git::{GitCli, check_git_installed, open_repository};
use gitscribe::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL, OpenAiClient};
use gitscribe::settings::default_settings_path;
use gitscribe::terminal::TerminalPrompter;
use gitscribe::{Completion, DiffScope, RunConfig, RunError, Session};

/// Propose a commit message for staged changes.
#[derive(Parser, Debug)]
#[command(name = "gitscribe")]
#[command(about = "Propose a commit message for staged changes and commit it")]
#[command(version)]
struct Cli {
    /// Show the generated message without running `git commit`
    #[arg(long, visible_alias = "dry-run")]
    skip_commit: bool,

    /// Which changes to describe
    #[arg(long, value_enum, default_value_t = DiffScope::Staged)]
    scope: DiffScope,

    /// Refuse diffs with at least this many whitespace-separated tokens
    #[arg(long, env = "GITSCRIBE_TOKEN_LIMIT", default_value_t = DEFAULT_TOKEN_LIMIT, value_parser = parse_token_limit)]
    token_limit: usize,

    /// Chat completions URL
    #[arg(long, env = "GITSCRIBE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model name sent with each request
    #[arg(long, env = "GITSCRIBE_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Path to the settings file (defaults to <config dir>/gitscribe/settings)
    #[arg(long, env = "GITSCRIBE_SETTINGS")]
    settings_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_token_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("token limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(Ok(completion)) => report_completion(&completion),
        Ok(Err(err)) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gitscribe=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Setup failures come back as the outer error; run outcomes as the inner result.
async fn run(cli: Cli) -> Result<Result<Completion, RunError>> {
    // Step 1: Check prerequisites
    check_git_installed().context("git is required")?;

    // Step 2: Locate the repository work tree
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let workdir = open_repository(&cwd)
        .context("Not a git repository. Run gitscribe from within a git repository.")?;

    // Step 3: Resolve configuration
    let settings_path = match cli.settings_file {
        Some(path) => path,
        None => match default_settings_path() {
            Ok(path) => path,
            Err(e) => return Ok(Err(e.into())),
        },
    };

    let config = RunConfig {
        scope: cli.scope,
        skip_commit: cli.skip_commit,
        token_limit: cli.token_limit,
        endpoint: cli.endpoint,
        model: cli.model,
        settings_path,
        // No command-line flag for the token
        access_token: std::env::var(TOKEN_ENV_VAR).ok(),
    };
    debug!("Resolved configuration: {:?}", config);

    // Step 4: Build collaborators and run the loop
    let client = OpenAiClient::new(config.endpoint.clone(), config.model.clone())
        .context("Failed to build HTTP client")?;
    let session = Session::new(config, GitCli::new(workdir), client, TerminalPrompter::new());

    Ok(session.run().await)
}

fn report_completion(completion: &Completion) -> ExitCode {
    match completion {
        Completion::Committed { summary, .. } => {
            println!("✓ Committed");
            if !summary.is_empty() {
                println!("{}", summary);
            }
        }
        Completion::Skipped { .. } => println!("Skipping commit (--skip-commit)"),
        Completion::Declined => println!("Aborting. Nothing was committed."),
        Completion::CommitFailed { error, .. } => eprintln!("Commit failed: {}", error),
    }

    if let Some(message) = completion.message() {
        println!("Message: {}", message);
    }

    ExitCode::from(completion.exit_code())
}
