mod config;
mod github;
mod index;
mod lookup;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

const DEFAULT_REPO: &str = "openshift/console";

/// pr-locator — CLI tool that finds which GitHub Pull Requests changed a
/// given file. Collects every PR's changed-file list once, snapshots it to
/// disk, then answers interactive filename lookups against the snapshot.
#[derive(Parser, Debug)]
#[command(name = "pr-locator", version, about)]
struct Cli {
    /// Path to a previously saved index document. When given, the document
    /// is loaded directly and GitHub collection is skipped.
    index_path: Option<PathBuf>,

    /// Repository to collect from, as owner/repo (default: openshift/console,
    /// or [github].repository from .pr-locator.toml)
    #[arg(long)]
    repo: Option<String>,

    /// Where the collector writes its index snapshot
    #[arg(long, default_value = "pr_files.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load()?;

    let slug = cli
        .repo
        .or_else(|| config.github.repository.clone())
        .unwrap_or_else(|| DEFAULT_REPO.to_string());
    let repo = github::RepoId::parse(&slug)?;
    debug!(owner = %repo.owner, repo = %repo.repo, "resolved repository");

    let index = match &cli.index_path {
        Some(path) => {
            let _span = info_span!("load_index", path = %path.display()).entered();
            info!("loading saved index, skipping collection");
            let loaded = index::load(path)?;
            info!(records = loaded.len(), "index loaded");
            loaded
        }
        None => {
            let creds = config
                .credentials()
                .ok_or(github::GithubError::MissingCredentials)?;

            info!("collecting pull requests from GitHub");
            let collected = github::collect(&repo, &creds).await?;

            index::save(&collected, &cli.output)?;
            println!(
                "{}",
                format!(
                    "saved {} pull requests to {}",
                    collected.len(),
                    cli.output.display()
                )
                .green()
            );
            collected
        }
    };

    lookup::run(&index, &repo)?;
    info!("done");

    Ok(())
}
