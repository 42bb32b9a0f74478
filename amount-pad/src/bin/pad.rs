use std::path::PathBuf;

use amount_core::{EntrySession, format_two_decimals};
use amount_pad::logging::init_tracing;
use amount_pad::{KeyScript, describe_expression, load_config};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Drive the amount-entry keypad from the command line.
///
/// Replays key scripts through an entry session the way the bill form does,
/// or evaluates an amount expression directly.
#[derive(Debug, Parser)]
#[command(name = "amount-pad")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a key script, e.g. "12.5+7 = =".
    Replay {
        /// Whitespace-separated keys; runs of single-character keys may be joined.
        #[arg(allow_hyphen_values = true)]
        script: String,

        /// Existing amount to start from, as when editing a bill.
        #[arg(short, long)]
        amount: Option<Decimal>,

        /// TOML file with display settings.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the form state after every key.
        #[arg(short, long, default_value_t = false)]
        steps: bool,
    },

    /// Evaluate an amount or chain and report whether it can be saved.
    Eval {
        /// Expression such as "12.50+7-3.20" or "-5+3".
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn replay(
    script: &str,
    amount: Option<Decimal>,
    config: Option<PathBuf>,
    steps: bool,
) -> Result<()> {
    let config = load_config(config.as_deref()).context("Failed to load configuration")?;
    let keys = KeyScript::parse(script).with_context(|| format!("Failed to parse: {script}"))?;

    let mut session = amount.map_or_else(EntrySession::new, EntrySession::with_amount);
    info!(keys = keys.len(), start = %session.buffer(), "replaying script");

    let trace = KeyScript::replay(&mut session, &keys, &config);
    if steps {
        for step in &trace {
            println!("{step}");
        }
    }

    println!("display: {}", session.display(&config));
    println!(
        "commit:  {}{}",
        config.label_for(session.commit_label()),
        if session.can_commit() { "" } else { " (disabled)" }
    );
    println!("phase:   {}", session.phase());
    if let Some(saved) = session.saved_amount() {
        println!("amount:  {}", format_two_decimals(saved));
    }

    Ok(())
}

fn eval(expression: &str) -> Result<()> {
    let description = describe_expression(expression)
        .with_context(|| format!("Failed to evaluate: {expression}"))?;
    println!("{description}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Replay {
            script,
            amount,
            config,
            steps,
        } => replay(&script, amount, config, steps),
        Command::Eval { expression } => eval(&expression),
    }
}
