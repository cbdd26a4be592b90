//! Command-line stand-in for the follower list screen: fetches one page of a
//! user's followers and prints the rows, or the alert when the fetch fails.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use followers_core::{
    spawn_fetch, Alert, Follower, FollowerClient, FollowerPage, UreqTransport, DEFAULT_BASE_URL,
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "followers", version, about = "List the followers of a GitHub user")]
struct Cli {
    /// GitHub login whose followers to list
    username: String,

    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Print the page as a JSON array
    #[arg(long)]
    json: bool,

    /// Log debug output to stderr
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    run(cli).await
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tracing::instrument(skip(cli), fields(username = %cli.username, page = cli.page))]
async fn run(cli: Cli) -> Result<ExitCode> {
    let client = FollowerClient::new(&cli.api_url, UreqTransport::new());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = spawn_fetch(client, cli.username.as_str(), cli.page, tx);
    let page = rx
        .recv()
        .await
        .context("fetch task ended without delivering a page")?;
    handle.join().await;

    if present(&page, cli.json)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print the page or its alert. Returns whether the fetch succeeded.
fn present(page: &FollowerPage, json: bool) -> Result<bool> {
    match &page.result {
        Ok(followers) => {
            info!(count = followers.len(), "followers fetched");
            if json {
                println!("{}", serde_json::to_string_pretty(followers)?);
            } else {
                print_rows(&page.username, page.page, followers);
            }
            Ok(true)
        }
        Err(err) => {
            debug!(?err, "showing alert");
            eprintln!("{}", Alert::for_error(err));
            Ok(false)
        }
    }
}

fn print_rows(username: &str, page: u32, followers: &[Follower]) {
    if followers.is_empty() {
        println!("{username} has no followers on page {page}.");
        return;
    }

    println!("Followers.count = {}", followers.len());
    let width = followers.iter().map(|f| f.login.len()).max().unwrap_or(0);
    for follower in followers {
        println!("{:<width$}  {}", follower.login, follower.avatar_url);
    }
}
