//! Document discovery.
//!
//! A run analyzes either a single text file, every `*.txt` file of a
//! directory, or one column of a delimited table.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use tracing::{debug, info};
use vocab_types::TableFormat;

/// One document to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `Filename` column: file name, or zero-based row index for tables.
    pub name: String,
    pub text: String,
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Sorted `*.txt` files directly inside `dir`.
pub fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        let is_txt = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        bail!("no .txt files found in {}", dir.display());
    }
    files.sort_by_key(|path| file_name(path));
    Ok(files)
}

/// Loads every document found at `input`.
///
/// With `text_column`, `input` is a delimited table and each row is one
/// document.
pub fn load(input: &Path, text_column: Option<&str>, format: TableFormat) -> Result<Vec<Document>> {
    if let Some(column) = text_column {
        return from_table(input, column, format);
    }

    if input.is_dir() {
        let files = text_files(input)?;
        info!(files = files.len(), dir = %input.display(), "found text files");
        return files
            .iter()
            .map(|path| {
                Ok(Document {
                    name: file_name(path),
                    text: read_text(path)?,
                })
            })
            .collect();
    }

    Ok(vec![Document {
        name: file_name(input),
        text: read_text(input)?,
    }])
}

fn from_table(path: &Path, column: &str, format: TableFormat) -> Result<Vec<Document>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .delimiter(format.delimiter)
        .quote(format.quote)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let index = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .position(|name| name == column)
        .with_context(|| format!("column '{column}' not found in {}", path.display()))?;

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("malformed row {} in {}", row + 1, path.display()))?;
        documents.push(Document {
            name: row.to_string(),
            text: record.get(index).unwrap_or_default().to_owned(),
        });
    }

    debug!(rows = documents.len(), column, "read document table");
    Ok(documents)
}
