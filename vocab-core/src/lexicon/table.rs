//! Category table reading.
//!
//! The first record is the header: column 0 labels the surface-form column
//! and every further column names a category. Rows may be ragged.

use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;
use vocab_types::{LexiconError, TableFormat};

/// A dictionary table as read from disk, before compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn record_cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_owned).collect()
}

fn read_error(err: csv::Error, fallback_record: u64) -> LexiconError {
    let reason = err.to_string();
    let record = err
        .position()
        .map(csv::Position::record)
        .unwrap_or(fallback_record);
    match err.into_kind() {
        csv::ErrorKind::Io(io) => LexiconError::Io(io),
        _ => LexiconError::Malformed { record, reason },
    }
}

impl CategoryTable {
    /// Builds a table from an in-memory header and rows.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Reads a table from any reader.
    pub fn from_reader<R: io::Read>(reader: R, format: TableFormat) -> Result<Self, LexiconError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(format.delimiter)
            .quote(format.quote)
            .from_reader(reader);

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record_cells(&record.map_err(|err| read_error(err, 0))?),
            None => return Err(LexiconError::MissingHeader),
        };

        let mut rows = Vec::new();
        for (i, record) in records.enumerate() {
            let record = record.map_err(|err| read_error(err, i as u64 + 1))?;
            rows.push(record_cells(&record));
        }

        debug!(columns = header.len(), rows = rows.len(), "read category table");
        Ok(Self { header, rows })
    }

    /// Reads a table from a file.
    pub fn from_path(path: impl AsRef<Path>, format: TableFormat) -> Result<Self, LexiconError> {
        let file = File::open(path)?;
        Self::from_reader(io::BufReader::new(file), format)
    }

    /// Parses a table held in memory.
    pub fn parse_str(contents: &str, format: TableFormat) -> Result<Self, LexiconError> {
        Self::from_reader(contents.as_bytes(), format)
    }

    /// The first record, verbatim.
    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Category names: every header cell after the first.
    #[inline]
    pub fn category_names(&self) -> &[String] {
        self.header.get(1..).unwrap_or_default()
    }

    /// Every record after the header, in file order.
    #[inline]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_header_and_rows() {
        let table = CategoryTable::parse_str(
            "Word,Emotion,Social\nhappy|glad,X,\nfriend,,X\n",
            TableFormat::default(),
        )
        .expect("should parse");

        assert_eq!(table.header(), ["Word", "Emotion", "Social"]);
        assert_eq!(table.category_names(), ["Emotion", "Social"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0], ["happy|glad", "X", ""]);
    }

    #[test]
    fn ragged_rows_are_kept() {
        let table = CategoryTable::parse_str("Word,A,B\nshort\nlong,x,y,z\n", TableFormat::default())
            .expect("should parse");
        assert_eq!(table.rows()[0], ["short"]);
        assert_eq!(table.rows()[1].len(), 4);
    }

    #[test]
    fn quoted_cells() {
        let table = CategoryTable::parse_str(
            "Word,A\n\"new york, ny|nyc\",x\n",
            TableFormat::default(),
        )
        .expect("should parse");
        assert_eq!(table.rows()[0][0], "new york, ny|nyc");
    }

    #[test]
    fn tab_separated() {
        let table = CategoryTable::parse_str("Word\tA\nhappy\tx\n", TableFormat::tsv())
            .expect("should parse");
        assert_eq!(table.category_names(), ["A"]);
        assert_eq!(table.rows()[0], ["happy", "x"]);
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = CategoryTable::parse_str("", TableFormat::default()).expect_err("should fail");
        assert!(matches!(err, LexiconError::MissingHeader));
    }

    #[test]
    fn single_column_header() {
        let table =
            CategoryTable::parse_str("Word\nhappy\n", TableFormat::default()).expect("should parse");
        assert!(table.category_names().is_empty());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"Word,A\nok,x\n\xff\xfe,x\n";
        let err = CategoryTable::from_reader(bytes, TableFormat::default()).expect_err("should fail");
        assert!(matches!(err, LexiconError::Malformed { .. }), "got {err}");
    }

    #[test]
    fn missing_file_is_io() {
        let err = CategoryTable::from_path("/no/such/dictionary.csv", TableFormat::default())
            .expect_err("should fail");
        assert!(matches!(err, LexiconError::Io(_)));
    }
}
