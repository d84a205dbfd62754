mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use easel_bridge::{BridgeMessage, ScenePatcher};
use easel_scene::Document;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "easel")]
#[command(version, about = "Replay reconciler message streams against a scene document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a JSON-lines message stream and print the resulting document
    Apply {
        /// Path to the stream file. Reads stdin when omitted
        file: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Tree)]
        format: Format,
    },
    /// Replay the built-in demo stream
    Demo {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Tree)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Tree,
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Tree => write!(f, "tree"),
            Format::Json => write!(f, "json"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Apply { file, format } => run_apply(file, format),
        Commands::Demo { format } => run_demo(format),
    }
}

fn run_apply(file: Option<PathBuf>, format: Format) -> Result<()> {
    let source = match &file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
            buffer
        }
    };

    let mut patcher = ScenePatcher::new(Document::new());
    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let message: BridgeMessage = serde_json::from_str(line)
            .with_context(|| format!("bad message on line {}", index + 1))?;
        patcher
            .apply(message)
            .with_context(|| format!("failed applying message from line {}", index + 1))?;
    }
    print_document(&patcher.into_document(), format)
}

fn run_demo(format: Format) -> Result<()> {
    let mut patcher = ScenePatcher::new(Document::new());
    patcher.apply_all(demo::stream()).context("demo stream failed to apply")?;
    print_document(&patcher.into_document(), format)
}

fn print_document(doc: &Document, format: Format) -> Result<()> {
    match format {
        Format::Tree => print!("{}", doc.tree_string()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&doc.snapshot())?),
    }
    Ok(())
}
