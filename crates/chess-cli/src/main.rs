//! Two-player chess in the terminal.
//!
//! Both players type moves at the same prompt; see `help` for the commands.

mod command;
mod config;
mod render;
mod session;

use anyhow::Context;
use clap::Parser;
use command::Command;
use config::{CliConfig, PolicySetting};
use session::Session;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess in the terminal")]
struct Cli {
    /// Configuration file (defaults to ./chess.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// How to score a position without legal moves
    #[arg(short, long, value_enum)]
    policy: Option<PolicySetting>,
    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(policy) = cli.policy {
        config.outcome_policy = policy;
    }

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Type 'help' for commands.")?;
    session.show(&mut stdout)?;

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(cmd) => {
                if !session.handle(cmd, &mut stdout)? {
                    break;
                }
            }
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    tracing::debug!(plies = session.game().ply_count(), "session ended");
    Ok(())
}
