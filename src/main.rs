mod chart;
mod config;
mod error;
mod fetch;
mod pipeline;
mod storage;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "chordgrab", version, about = "Save a chord chart page into a local song collection")]
struct Cli {
    /// Override config file path.
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Override the song collection file for this run.
    #[arg(long, global = true)]
    store: Option<std::path::PathBuf>,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a chord page and store it (default). Prompts when no URL is given.
    Grab { url: Option<String> },
    /// Print the stored songs to stdout.
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cfg = load_config(&cli)?;

    match cli.command.unwrap_or(Command::Grab { url: None }) {
        Command::Grab { url } => {
            let url = match url {
                Some(u) => u,
                None => prompt_url().context("read url")?,
            };
            match pipeline::run(&url, &cfg).await? {
                Ok(report) => println!("{report}"),
                Err(e) => println!("{e}"),
            }
        }
        Command::List => {
            let songs = storage::SongCollection::load(&cfg.store.path);
            print!("{}", render_songs(&songs));
        }
    }

    Ok(())
}

fn prompt_url() -> anyhow::Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "Enter URL: ")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Config file plus command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<config::Config> {
    let mut cfg = config::load(cli.config.as_deref()).context("load config")?;
    if let Some(path) = &cli.store {
        cfg.store.path = path.clone();
    }
    Ok(cfg)
}

fn render_songs(songs: &storage::SongCollection) -> String {
    if songs.is_empty() {
        return "No songs stored.\n".to_string();
    }
    songs
        .entries()
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:02}. {} — {}\n", i + 1, s.title, s.artist))
        .collect()
}
