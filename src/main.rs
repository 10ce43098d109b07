//! `click-analytics` command-line host.
//!
//! Boots a host with a click counter exposed under its configured global and
//! drives it from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Dispatch clicks and print the final tally
//! cargo run -- simulate --clicks 3
//!
//! # Destroy after one click, print the result as JSON
//! cargo run -- simulate --clicks 5 --destroy-after 1 --json
//!
//! # Interactive session reading commands from stdin
//! cargo run -- repl
//!
//! # Show the effective configuration
//! cargo run -- config
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use click_analytics::config::{self, Config};
use click_analytics::domain::click_counter::ClickCount;
use click_analytics::domain::ui_event::{EventKind, UiEvent};
use click_analytics::host::{Host, HostHandle};

/// Click counter host.
#[derive(Parser)]
#[command(name = "click-analytics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a number of clicks and print the final tally
    Simulate {
        /// Number of click events to dispatch
        #[arg(short, long, default_value_t = 3)]
        clicks: u64,

        /// Destroy the counter after this many clicks
        #[arg(short, long)]
        destroy_after: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read commands from stdin (`help` lists them)
    Repl,

    /// Print the effective configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();
    let config = config::load_from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Simulate {
            clicks,
            destroy_after,
            json,
        } => simulate(&config, clicks, destroy_after, json).await?,
        Commands::Repl => repl(&config).await?,
        Commands::Config { json } => show_config(&config, json)?,
    }

    Ok(())
}

/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// Runs before configuration is loaded so that configuration warnings are
/// visible; it reads `RUST_LOG` and `LOG_FORMAT` itself.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn simulate(
    config: &Config,
    clicks: u64,
    destroy_after: Option<u64>,
    as_json: bool,
) -> Result<()> {
    config.print_summary();

    let host = Host::start(config).context("Failed to start host")?;
    let handle = host.handle().clone();
    let global = handle.global_name().to_string();

    for n in 0..clicks {
        if destroy_after == Some(n) {
            handle.destroy(&global).await?;
        }
        handle.click().await?;
    }
    if destroy_after.is_some_and(|k| k >= clicks) {
        handle.destroy(&global).await?;
    }

    let result = handle.get_clicks(&global).await?;
    drop(handle);
    host.shutdown().await;

    if as_json {
        let body = json!({
            "global": global,
            "dispatched": clicks,
            "destroy_after": destroy_after,
            "clicks": result,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{} {}", format!("{global}.getClicks():").bright_white(), paint(result));
    }

    Ok(())
}

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Dispatch(EventKind, Option<String>),
    Destroy(Option<String>),
    Clicks(Option<String>),
    Globals,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Option<ReplCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next().map(|s| s.to_string());

    let command = match word {
        "destroy" => ReplCommand::Destroy(arg),
        "clicks" | "getClicks" => ReplCommand::Clicks(arg),
        "globals" => ReplCommand::Globals,
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => match other.parse::<EventKind>() {
            Ok(kind) => ReplCommand::Dispatch(kind, arg),
            Err(_) => return Err(format!("unknown command `{other}` (try `help`)")),
        },
    };

    Ok(Some(command))
}

async fn repl(config: &Config) -> Result<()> {
    let host = Host::start(config).context("Failed to start host")?;
    let handle = host.handle().clone();

    println!(
        "{}",
        format!("Counter exposed as `{}`. Type `help` for commands.", handle.global_name())
            .bright_blue()
            .bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        match parse_command(&line) {
            Ok(Some(ReplCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = run_command(&handle, command).await {
                    println!("{}", format!("error: {e}").red());
                }
            }
            Ok(None) => {}
            Err(message) => println!("{}", message.yellow()),
        }
    }

    drop(handle);
    host.shutdown().await;
    Ok(())
}

async fn run_command(handle: &HostHandle, command: ReplCommand) -> Result<()> {
    let resolve =
        |global: Option<String>| global.unwrap_or_else(|| handle.global_name().to_string());

    match command {
        ReplCommand::Dispatch(kind, target) => {
            handle.dispatch(UiEvent::new(kind, target.as_deref())).await?;
        }
        ReplCommand::Destroy(global) => {
            let global = resolve(global);
            handle.destroy(&global).await?;
            println!("{}", format!("{global} destroyed").green());
        }
        ReplCommand::Clicks(global) => {
            let global = resolve(global);
            let result = handle.get_clicks(&global).await?;
            println!("{}", paint(result));
        }
        ReplCommand::Globals => {
            for name in handle.namespace().names() {
                println!("  {}", name.cyan());
            }
        }
        ReplCommand::Help => {
            println!(
                "  {}  dispatch an event (click, dblclick, contextmenu, keydown)",
                "<event> [target]".cyan()
            );
            println!("  {}  destroy a counter", "destroy [global]".cyan());
            println!("  {}  print getClicks()", "clicks [global]".cyan());
            println!("  {}  list exposed globals", "globals".cyan());
            println!("  {}  leave", "quit".cyan());
        }
        ReplCommand::Quit => {}
    }

    Ok(())
}

fn paint(result: ClickCount) -> ColoredString {
    match result {
        ClickCount::Active(n) => n.to_string().bright_yellow().bold(),
        ClickCount::Destroyed => result.to_string().red(),
    }
}

fn show_config(config: &Config, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Configuration".bright_blue().bold());
    println!("  Global name:    {}", config.global_name.cyan());
    println!(
        "  Diagnostics:    {}",
        if config.diagnostics_enabled {
            format!("enabled (tag {:?})", config.diagnostic_tag).green()
        } else {
            "disabled".yellow()
        }
    );
    println!("  Queue capacity: {}", config.event_queue_capacity);
    println!("  Log level:      {}", config.log_level);
    println!("  Log format:     {}", config.log_format);
    Ok(())
}
