use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use flatpos::{discover_settings, try_load_settings, Document};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Print highlighted ranges of a plain-text document as structured positions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Document to highlight. Lines are paragraphs; leading tabs are indentation.
    file: PathBuf,

    /// Settings file. Defaults to the nearest settings.toml around FILE.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Translate every offset from the start of the document.
    #[arg(long)]
    reset_each_query: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read '{}'", cli.file.display()))?;

    let settings = match &cli.settings {
        Some(path) => try_load_settings(path)?,
        None => {
            let dir = cli
                .file
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            discover_settings(dir).0
        }
    };

    let mut options = settings.translate_options();
    if cli.reset_each_query {
        options.reset_to_start = true;
    }

    let highlighter = settings.try_highlighter()?;
    if highlighter.is_empty() {
        warn!("no highlight rules configured");
    }

    let document = Document::parse(&source);
    let text = document.text();

    for range in highlighter.highlight(&document, options) {
        let matched: String = text
            .chars()
            .skip(range.token.start)
            .take(range.token.len)
            .collect();
        println!(
            "{} {}..{} {} -> {} {:?}",
            range.rule,
            range.token.start,
            range.token.end(),
            range.start,
            range.end,
            matched
        );
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FLATPOS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
