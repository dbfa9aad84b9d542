use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use pure_fill::{DEFAULT_MAX_PASSES, DEFAULT_MAX_RETRIES, Options, Replacer};
use tdoc::{Document, markdown, parse, writer::Writer};

/// Fill `${name}` placeholders and resolve `<name>`...`</name>` blocks in a document.
#[derive(Debug, Parser)]
#[command(name = "pure-fill", version)]
struct Cli {
    /// FTML or Markdown document to fill
    input: PathBuf,
    /// Where to write the result (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Replace `${NAME}` with VALUE
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, String)>,
    /// Keep the content of `<NAME>` blocks, dropping only the tags
    #[arg(long, value_name = "NAME")]
    keep: Vec<String>,
    /// Remove `<NAME>` blocks together with their content
    #[arg(long, value_name = "NAME")]
    remove: Vec<String>,
    /// Attempts allowed to clear one placeholder from one paragraph
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    max_retries: usize,
    /// Document scans allowed to resolve all blocks of one name
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    max_passes: usize,
    /// Treat the input as Markdown regardless of its extension
    #[arg(long)]
    markdown: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DocumentFormat {
    Ftml,
    Markdown,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("md") | Some("markdown") | Some("mkd") | Some("mdown") | Some("mdtxt") => {
                DocumentFormat::Markdown
            }
            _ => DocumentFormat::Ftml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let format = if cli.markdown {
        DocumentFormat::Markdown
    } else {
        DocumentFormat::from_path(&cli.input)
    };
    let mut document = load_document(&cli.input, format)?;

    let replacer = Replacer::new(Options {
        max_retries: cli.max_retries,
        max_passes: cli.max_passes,
    });
    let blocks = cli
        .keep
        .iter()
        .map(|name| (name.as_str(), true))
        .chain(cli.remove.iter().map(|name| (name.as_str(), false)));
    let resolved = replacer
        .apply_blocks(&mut document, blocks)
        .with_context(|| format!("failed to resolve blocks in {}", cli.input.display()))?;
    let rewritten = replacer
        .substitute(&mut document, cli.assignments.iter().map(|(name, value)| (name, value)))
        .with_context(|| format!("failed to fill placeholders in {}", cli.input.display()))?;
    info!("resolved {resolved} block(s), rewrote {rewritten} paragraph(s)");

    let contents = render_document(&document, format)?;
    match &cli.output {
        Some(path) => fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(&contents)
            .context("failed to write to stdout")?,
    }
    Ok(())
}

fn load_document(path: &Path, format: DocumentFormat) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = match format {
        DocumentFormat::Ftml => parse(std::io::Cursor::new(content))
            .map_err(|err| -> Box<dyn std::error::Error + Send + Sync> { Box::new(err) }),
        DocumentFormat::Markdown => markdown::parse(std::io::Cursor::new(content)),
    };
    parsed.map_err(|err| anyhow!("failed to parse {}: {err}", path.display()))
}

fn render_document(document: &Document, format: DocumentFormat) -> Result<Vec<u8>> {
    match format {
        DocumentFormat::Ftml => {
            let writer = Writer::new();
            let contents = writer
                .write_to_string(document)
                .context("failed to render FTML")?;
            Ok(contents.into_bytes())
        }
        DocumentFormat::Markdown => {
            let mut contents = Vec::new();
            markdown::write(&mut contents, document).context("failed to render Markdown")?;
            Ok(contents)
        }
    }
}

fn parse_assignment(arg: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    if name.is_empty() {
        return Err(format!("missing placeholder name in '{arg}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
