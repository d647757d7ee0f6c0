//! Result table output.

use std::io;

use anyhow::Result;
use csv::{Writer, WriterBuilder};
use vocab_types::{DocumentMetrics, TableFormat};

/// Which optional columns the result table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Add the document text after `Filename`.
    pub include_text: bool,
    /// Add `<cat>_Count` and `<cat>_Unique` per category.
    pub raw_counts: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_text: false,
            raw_counts: true,
        }
    }
}

const DOCUMENT_COLUMNS: [&str; 9] = [
    "WC",
    "TC_Raw",
    "TTR_Raw",
    "TC_Clean",
    "TTR_Clean",
    "TC_NonDict",
    "TTR_NonDict",
    "DictPercent",
    "CapturedText",
];

/// Column names for a lexicon with `categories`.
pub fn header(categories: &[String], options: ReportOptions) -> Vec<String> {
    let mut columns = vec!["Filename".to_owned()];
    if options.include_text {
        columns.push("text".to_owned());
    }
    columns.extend(DOCUMENT_COLUMNS.iter().map(|c| (*c).to_owned()));
    for category in categories {
        columns.push(format!("{category}_CWR"));
        columns.push(format!("{category}_CCR"));
        if options.raw_counts {
            columns.push(format!("{category}_Count"));
            columns.push(format!("{category}_Unique"));
        }
    }
    columns
}

/// Writes the result table row by row.
pub struct ReportWriter<W: io::Write> {
    writer: Writer<W>,
    options: ReportOptions,
}

impl<W: io::Write> ReportWriter<W> {
    /// Creates a writer and emits the header row.
    pub fn new(
        sink: W,
        format: TableFormat,
        categories: &[String],
        options: ReportOptions,
    ) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .delimiter(format.delimiter)
            .quote(format.quote)
            .from_writer(sink);
        writer.write_record(header(categories, options))?;
        Ok(Self { writer, options })
    }

    /// Appends one document's row.
    pub fn write(&mut self, name: &str, text: &str, metrics: &DocumentMetrics) -> Result<()> {
        let mut row: Vec<String> = Vec::with_capacity(12 + metrics.categories.len() * 4);
        row.push(name.to_owned());
        if self.options.include_text {
            row.push(text.to_owned());
        }
        row.push(metrics.word_count.to_string());
        row.push(metrics.raw.count.to_string());
        row.push(metrics.raw.type_token_ratio.to_string());
        row.push(metrics.clean.count.to_string());
        row.push(metrics.clean.type_token_ratio.to_string());
        row.push(metrics.non_dict.count.to_string());
        row.push(metrics.non_dict.type_token_ratio.to_string());
        row.push(metrics.dict_percent.to_string());
        row.push(metrics.captured_text.clone());

        for score in &metrics.categories {
            row.push(score.cwr.to_string());
            row.push(score.ccr.to_string());
            if self.options.raw_counts {
                row.push(score.total.to_string());
                row.push(score.unique.to_string());
            }
        }

        self.writer.write_record(&row)?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(self) -> Result<W> {
        self.writer.into_inner().map_err(|err| anyhow::anyhow!("{}", err.error()))
    }
}
