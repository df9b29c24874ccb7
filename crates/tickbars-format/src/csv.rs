//! CSV input and output.

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::StreamExt;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;
use tickbars_aggregate::Bar;
use tickbars_types::{ColumnNames, FieldAccess, FieldValue, Record, TickbarsError};
use tokio::io::AsyncRead;

use crate::formatter::{format_timestamp, has_notional};
use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
    /// Header name of the timestamp column.
    time_column: String,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
            time_column: ColumnNames::DEFAULT_TIME.to_string(),
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets the header name of the timestamp column.
    #[must_use]
    pub fn with_time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = name.into();
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub fn tsv() -> Self {
        Self::new().with_delimiter('\t')
    }

    /// Reads records from CSV with a header row.
    ///
    /// The header is checked for every column in `columns` before the first
    /// data row is read.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Records`] for missing columns or invalid values
    /// and [`FormatError::Csv`] for malformed CSV.
    pub async fn read_records<R>(
        &self,
        reader: R,
        columns: &ColumnNames,
    ) -> Result<Vec<Record>, FormatError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut csv = AsyncReaderBuilder::new()
            .delimiter(u8::try_from(self.delimiter).unwrap_or(b','))
            .create_reader(reader);

        let index: HashMap<String, usize> = csv
            .headers()
            .await?
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        if let Some(missing) = columns.first_missing(|name| index.contains_key(name)) {
            return Err(TickbarsError::missing_column(missing, None).into());
        }

        let mut records = Vec::new();
        let mut rows = csv.records();
        while let Some(row) = rows.next().await {
            let row = row?;
            let fields = CsvRow {
                index: &index,
                row: &row,
            };
            records.push(Record::from_fields(&fields, columns, records.len())?);
        }

        tracing::debug!(rows = records.len(), "read CSV records");
        Ok(records)
    }
}

/// A CSV row addressed through the header index.
struct CsvRow<'a> {
    index: &'a HashMap<String, usize>,
    row: &'a StringRecord,
}

impl FieldAccess for CsvRow<'_> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let position = *self.index.get(name)?;
        self.row
            .get(position)
            .map(|cell| FieldValue::Text(Cow::Borrowed(cell)))
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        let notional = has_notional(bars);

        if self.include_header {
            write!(
                writer,
                "{}{d}open{d}high{d}low{d}close{d}volume",
                self.time_column
            )?;
            if notional {
                write!(writer, "{d}notional")?;
            }
            writeln!(writer, "{d}record_count")?;
        }

        for bar in bars {
            write!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                format_timestamp(bar.timestamp),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
            if notional {
                write!(writer, "{d}{}", bar.notional.unwrap_or_default())?;
            }
            writeln!(writer, "{d}{}", bar.record_count)?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
