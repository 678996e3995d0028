//! Z Reader CLI - a command-line front end for the Z Reader backend.
//!
//! Log in, inspect the current account, and manage book categories and
//! storage providers from the terminal.

mod app;
mod navigator;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use zreader_core::Config;

#[derive(Debug, Parser)]
#[command(name = "zreader", version, about = "Command-line client for Z Reader")]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, env = "ZREADER_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(short, long, env = "ZREADER_USERNAME")]
        username: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update profile fields
    Profile {
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// 0 = male, 1 = female
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        gender: Option<u8>,
    },
    /// Manage book categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage storage providers
    Storages {
        #[command(subcommand)]
        action: StorageAction,
    },
    /// Print the message for a business code
    Explain { code: String },
}

#[derive(Debug, Subcommand)]
pub enum CategoryAction {
    List,
    Add { name: String },
    Rename { id: i64, name: String },
    Remove { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum StorageAction {
    List,
    Toggle { id: i64 },
    Remove { id: i64 },
}

/// Initialize the tracing subscriber for logging
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "zreader.log".into());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref());

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Table message for a code, flagging codes the table does not know
fn explain(code: &str) -> String {
    let message = zreader_core::codes::message_for(code);
    if zreader_core::codes::is_known(code) {
        message.to_string()
    } else {
        format!("{} (unrecognized code {})", message, code)
    }
}

async fn run(command: Command) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    let mut app = App::new(config)?;
    info!(base_url = %app.base_url(), "Z Reader CLI starting");

    let result = match command {
        Command::Login { username } => app.login(username).await,
        Command::Logout => app.logout().await,
        Command::Whoami => app.whoami().await,
        Command::Profile {
            nickname,
            email,
            avatar_url,
            bio,
            gender,
        } => {
            app.update_profile(zreader_core::models::UpdateProfile {
                nickname,
                email,
                avatar_url,
                gender,
                bio,
            })
            .await
        }
        Command::Categories { action } => app.categories(action).await,
        Command::Storages { action } => app.storages(action).await,
        Command::Explain { code } => {
            println!("{}", explain(&code));
            Ok(())
        }
    };

    // Session expired mid-command: back to the login entry point
    if app.login_requested() && io::stdin().is_terminal() && app.login(None).await.is_ok() {
        eprintln!("Logged in again; re-run the previous command.");
    }

    result
}
