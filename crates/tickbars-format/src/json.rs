//! JSON input and output.

use serde_json::{Deserializer, Value};
use std::io::{Read, Write};
use tickbars_aggregate::Bar;
use tickbars_types::{ColumnNames, Record, TickbarsError};

use crate::formatter::format_timestamp;
use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
    /// Key of the timestamp field.
    time_column: String,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
            time_column: ColumnNames::DEFAULT_TIME.to_string(),
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub fn ndjson() -> Self {
        Self::new().with_style(JsonStyle::Ndjson)
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the key of the timestamp field.
    #[must_use]
    pub fn with_time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = name.into();
        self
    }

    /// Reads records from a JSON array or NDJSON stream of objects.
    ///
    /// All rows are parsed before conversion starts.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Json`] for malformed JSON and
    /// [`FormatError::Records`] for rows that are not objects, lack a
    /// required column, or hold invalid values.
    pub fn read_records<R: Read>(
        &self,
        reader: R,
        columns: &ColumnNames,
    ) -> Result<Vec<Record>, FormatError> {
        let rows: Vec<Value> = match self.style {
            JsonStyle::Array => serde_json::from_reader(reader)?,
            JsonStyle::Ndjson => Deserializer::from_reader(reader)
                .into_iter::<Value>()
                .collect::<Result<_, _>>()?,
        };

        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let fields = row
                    .as_object()
                    .ok_or_else(|| TickbarsError::missing_column(&columns.time, Some(index)))?;
                Record::from_fields(fields, columns, index)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rows = records.len(), style = ?self.style, "read JSON records");
        Ok(records)
    }

    /// Converts a bar into a JSON object keyed by the configured time column.
    fn bar_value(&self, bar: &Bar) -> Result<Value, FormatError> {
        let mut value = serde_json::to_value(bar)?;
        if let Some(fields) = value.as_object_mut() {
            fields.remove("timestamp");
            fields.insert(
                self.time_column.clone(),
                Value::String(format_timestamp(bar.timestamp)),
            );
        }
        Ok(value)
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let values = bars
            .iter()
            .map(|bar| self.bar_value(bar))
            .collect::<Result<Vec<_>, _>>()?;

        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &values)?;
                } else {
                    serde_json::to_writer(&mut writer, &values)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for value in &values {
                    serde_json::to_writer(&mut writer, value)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
