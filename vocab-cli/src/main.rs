//! `vocabulate`: dictionary-based lexical analysis over a corpus.
//!
//! ```bash
//! vocabulate --dict emotions.csv --input posts/ --stopwords stop.txt --output results.csv
//! RUST_LOG=debug vocabulate --dict emotions.csv --input posts.csv --text-column body -o out.csv
//! ```

mod documents;
mod report;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use vocab_core::{Analyzer, CategoryTable, CompiledLexicon, Stoplist};
use vocab_types::{AnalyzerConfig, DocumentMetrics, TableFormat, WhitespaceMethod};

use crate::documents::Document;
use crate::report::{ReportOptions, ReportWriter};

#[derive(Debug, Parser)]
#[command(author, version, about = "Scores texts against a category dictionary")]
struct Cli {
    /// Category table: first column surface forms, one column per category.
    #[arg(short, long, value_name = "FILE")]
    dict: PathBuf,

    /// A text file, a directory of .txt files, or a table with --text-column.
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Newline-separated stopword list.
    #[arg(short, long, value_name = "FILE")]
    stopwords: Option<PathBuf>,

    /// Result table to write; stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Field delimiter for every table read or written.
    #[arg(long, default_value = ",", value_parser = parse_byte)]
    delimiter: u8,

    /// Quote character for every table read or written.
    #[arg(long, default_value = "\"", value_parser = parse_byte)]
    quote: u8,

    /// `WC` method: "new" splits and/or style words on '/', "old" does not.
    #[arg(long, default_value = "new")]
    whitespace_method: WhitespaceMethod,

    /// Leave out the <cat>_Count and <cat>_Unique columns.
    #[arg(long)]
    no_raw_counts: bool,

    /// Copy each document's text into the result table.
    #[arg(long)]
    include_text: bool,

    /// Keep token case instead of lower-casing.
    #[arg(long)]
    preserve_case: bool,

    /// Keep runs of repeated letters and digits ("soooo").
    #[arg(long)]
    no_reduce_repeats: bool,

    /// Worker threads; defaults to one per core.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Column holding the text when --input is a table.
    #[arg(long, value_name = "NAME")]
    text_column: Option<String>,
}

impl Cli {
    fn format(&self) -> TableFormat {
        TableFormat {
            delimiter: self.delimiter,
            quote: self.quote,
        }
    }

    fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            reduce_repeated_chars: !self.no_reduce_repeats,
            preserve_case: self.preserve_case,
            whitespace_method: self.whitespace_method,
        }
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            include_text: self.include_text,
            raw_counts: !self.no_raw_counts,
        }
    }
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let s = match s {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match s.as_bytes() {
        [b] => Ok(*b),
        _ => Err(format!("expected a single ASCII character, got '{s}'")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let started = Instant::now();
    let format = cli.format();

    let table = CategoryTable::from_path(&cli.dict, format)
        .with_context(|| format!("failed to load dictionary {}", cli.dict.display()))?;
    let lexicon = CompiledLexicon::compile(&table)
        .with_context(|| format!("failed to compile dictionary {}", cli.dict.display()))?;
    info!(stats = %lexicon.stats(), "dictionary loaded");

    let stoplist = match &cli.stopwords {
        Some(path) => Stoplist::from_path(path)
            .with_context(|| format!("failed to load stopwords {}", path.display()))?,
        None => Stoplist::new(),
    };
    if !stoplist.is_empty() {
        info!(words = stoplist.len(), "stopwords loaded");
    }

    let docs = documents::load(&cli.input, cli.text_column.as_deref(), format)?;
    if docs.is_empty() {
        bail!("no documents found in {}", cli.input.display());
    }
    info!(documents = docs.len(), "analyzing");

    let analyzer = Analyzer::new(lexicon, stoplist, cli.analyzer_config());
    let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
    let results = match cli.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("failed to start worker pool")?
            .install(|| analyzer.analyze_batch(texts.as_slice())),
        None => analyzer.analyze_batch(texts.as_slice()),
    };

    let categories = analyzer.lexicon().categories();
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_report(BufWriter::new(file), cli, categories, &docs, &results)?;
        }
        None => write_report(io::stdout().lock(), cli, categories, &docs, &results)?,
    }

    let destination = match &cli.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_owned(),
    };
    info!(
        documents = results.len(),
        output = %destination,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

fn write_report<W: io::Write>(
    sink: W,
    cli: &Cli,
    categories: &[String],
    docs: &[Document],
    results: &[DocumentMetrics],
) -> Result<()> {
    let mut writer = ReportWriter::new(sink, cli.format(), categories, cli.report_options())?;
    for (doc, metrics) in docs.iter().zip(results) {
        writer.write(&doc.name, &doc.text, metrics)?;
    }
    writer.finish()?;
    Ok(())
}
