use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quarry_core::bootstrap::{build_loader, build_pipeline, resolve_config_path};
use quarry_core::config::Config;
use quarry_ingest::{Chunk, Document, SourceRef};

#[derive(Debug, Parser)]
#[command(name = "quarry", version, about = "Load documents and cut them into chunks")]
struct Cli {
    /// Path to the TOML config file (default: `$QUARRY_CONFIG` or config/default.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a file, directory or video URL and print one JSON document per line
    Load {
        reference: String,
        /// Text file encoding label, overrides the config
        #[arg(long)]
        encoding: Option<String>,
    },
    /// Load references in order and print one JSON chunk per line
    Split {
        #[arg(required = true)]
        references: Vec<String>,
        #[arg(long)]
        chunk_size: Option<usize>,
        #[arg(long)]
        chunk_overlap: Option<usize>,
        /// Print chunk records with source metadata instead of bare strings
        #[arg(long)]
        with_metadata: bool,
    },
    /// Print how a reference would be interpreted
    Classify { reference: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = Config::load(&config_path)?;

    match cli.command {
        Command::Load {
            reference,
            encoding,
        } => {
            if let Some(encoding) = encoding {
                config.loader.encoding = encoding;
            }
            config.validate()?;
            let documents = build_loader(&config)?
                .load(&reference)
                .await
                .with_context(|| format!("failed to load {reference}"))?;
            write_documents(&documents)?;
        }
        Command::Split {
            references,
            chunk_size,
            chunk_overlap,
            with_metadata,
        } => {
            if let Some(size) = chunk_size {
                config.splitter.chunk_size = size;
            }
            if let Some(overlap) = chunk_overlap {
                config.splitter.chunk_overlap = overlap;
            }
            config.validate()?;
            let pipeline = build_pipeline(&config)?;

            if with_metadata {
                let mut chunks: Vec<Chunk> = Vec::new();
                for reference in &references {
                    chunks.extend(
                        pipeline
                            .ingest(reference)
                            .await
                            .with_context(|| format!("failed to load {reference}"))?,
                    );
                }
                write_json_lines(&chunks)?;
            } else {
                let chunks = pipeline
                    .split_all(&references)
                    .await
                    .context("failed to load references")?;
                write_json_lines(&chunks)?;
            }
        }
        Command::Classify { reference } => {
            let source = SourceRef::classify(&reference);
            writeln!(std::io::stdout(), "{source}")?;
        }
    }

    Ok(())
}

fn write_documents(documents: &[Document]) -> anyhow::Result<()> {
    tracing::info!(count = documents.len(), "writing documents");
    write_json_lines(documents)
}

fn write_json_lines<T: serde::Serialize>(items: &[T]) -> anyhow::Result<()> {
    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    for item in items {
        serde_json::to_writer(&mut out, item)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Logs go to stderr so stdout stays a clean JSON-lines stream.
fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
