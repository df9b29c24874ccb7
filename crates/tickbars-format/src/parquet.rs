//! Apache Parquet input and output.

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, TimestampMicrosecondArray, UInt64Array};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Field, Float64Type, Int64Type, Schema, TimeUnit, TimestampMicrosecondType,
};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use parquet::file::reader::ChunkReader;
use std::io::Write;
use std::sync::Arc;
use tickbars_aggregate::Bar;
use tickbars_types::{ColumnNames, Record, TickbarsError, parse_timestamp};

use crate::formatter::has_notional;
use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
    /// Name of the timestamp column.
    time_column: String,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
            time_column: ColumnNames::DEFAULT_TIME.to_string(),
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the name of the timestamp column.
    #[must_use]
    pub fn with_time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = name.into();
        self
    }

    /// Reads records from a Parquet file.
    ///
    /// Column presence and types are validated against the file schema before
    /// any row is decoded. Numeric columns may be any Arrow numeric type. The
    /// time key may be a timestamp, a date, an integer of epoch milliseconds,
    /// or a string.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Records`] for missing columns, unsupported
    /// column types or null/non-finite values, and [`FormatError::Parquet`]
    /// for decoding failures.
    pub fn read_records<R: ChunkReader + 'static>(
        &self,
        reader: R,
        columns: &ColumnNames,
    ) -> Result<Vec<Record>, FormatError> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader).map_err(parquet_error)?;
        let schema = Arc::clone(builder.schema());

        if let Some(missing) = columns.first_missing(|name| schema.field_with_name(name).is_ok()) {
            return Err(TickbarsError::missing_column(missing, None).into());
        }
        for name in &columns.required()[1..] {
            let data_type = schema.field_with_name(name).map_err(parquet_error)?.data_type();
            if !data_type.is_numeric() {
                return Err(TickbarsError::invalid_value(*name, None, data_type.to_string()).into());
            }
        }
        let time_type = schema
            .field_with_name(&columns.time)
            .map_err(parquet_error)?
            .data_type();
        if !is_time_type(time_type) {
            return Err(
                TickbarsError::invalid_value(&columns.time, None, time_type.to_string()).into(),
            );
        }

        let batches = builder
            .with_batch_size(self.row_group_size)
            .build()
            .map_err(parquet_error)?;

        let mut records = Vec::new();
        for batch in batches {
            let batch = batch.map_err(parquet_error)?;
            let offset = records.len();
            let column = |name: &str| {
                batch
                    .column_by_name(name)
                    .ok_or_else(|| TickbarsError::missing_column(name, None))
            };

            let times = time_values(column(&columns.time)?, &columns.time, offset)?;
            let open = float_values(column(&columns.open)?, &columns.open, offset)?;
            let high = float_values(column(&columns.high)?, &columns.high, offset)?;
            let low = float_values(column(&columns.low)?, &columns.low, offset)?;
            let close = float_values(column(&columns.close)?, &columns.close, offset)?;
            let volume = float_values(column(&columns.volume)?, &columns.volume, offset)?;

            records.extend((0..batch.num_rows()).map(|i| {
                Record::new(times[i], open[i], high[i], low[i], close[i], volume[i])
            }));
        }

        tracing::debug!(rows = records.len(), "read Parquet records");
        Ok(records)
    }

    /// Creates the Arrow schema for bar data.
    fn bar_schema(&self, with_notional: bool) -> Schema {
        let mut fields = vec![
            Field::new(
                &self.time_column,
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false,
            ),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
        ];
        if with_notional {
            fields.push(Field::new("notional", DataType::Float64, false));
        }
        fields.push(Field::new("record_count", DataType::UInt64, false));
        Schema::new(fields)
    }

    /// Converts bars to an Arrow `RecordBatch`.
    fn bars_to_batch(schema: &Arc<Schema>, bars: &[Bar]) -> Result<RecordBatch, FormatError> {
        let with_notional = schema.field_with_name("notional").is_ok();
        let timestamps: Vec<_> = bars
            .iter()
            .map(|b| b.timestamp.timestamp_micros())
            .collect();
        let float = |f: fn(&Bar) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from(bars.iter().map(f).collect::<Vec<_>>()))
        };

        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
            float(|b| b.open),
            float(|b| b.high),
            float(|b| b.low),
            float(|b| b.close),
            float(|b| b.volume),
        ];
        if with_notional {
            arrays.push(float(|b| b.notional.unwrap_or_default()));
        }
        arrays.push(Arc::new(UInt64Array::from(
            bars.iter().map(|b| b.record_count).collect::<Vec<_>>(),
        )));

        RecordBatch::try_new(Arc::clone(schema), arrays).map_err(parquet_error)
    }
}

impl Formatter for ParquetFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        let schema = Arc::new(self.bar_schema(has_notional(bars)));
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(parquet_error)?;

        // Write in batches
        for chunk in bars.chunks(self.row_group_size) {
            let batch = Self::bars_to_batch(&schema, chunk)?;
            arrow_writer.write(&batch).map_err(parquet_error)?;
        }

        arrow_writer.close().map_err(parquet_error)?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

fn parquet_error(err: impl std::fmt::Display) -> FormatError {
    FormatError::Parquet(err.to_string())
}

const fn is_time_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Timestamp(_, _)
            | DataType::Date32
            | DataType::Date64
            | DataType::Int32
            | DataType::Int64
            | DataType::Utf8
            | DataType::LargeUtf8
    )
}

/// Decodes a numeric column as finite `f64` values.
fn float_values(array: &ArrayRef, name: &str, offset: usize) -> Result<Vec<f64>, FormatError> {
    let floats = cast(array, &DataType::Float64).map_err(parquet_error)?;
    let floats = floats.as_primitive::<Float64Type>();
    (0..floats.len())
        .map(|i| {
            let value = floats.value(i);
            if floats.is_null(i) || !value.is_finite() {
                let shown = if floats.is_null(i) {
                    "null".to_string()
                } else {
                    value.to_string()
                };
                Err(FormatError::from(TickbarsError::invalid_value(
                    name,
                    Some(offset + i),
                    shown,
                )))
            } else {
                Ok(value)
            }
        })
        .collect()
}

/// Decodes the time key column as UTC instants.
fn time_values(
    array: &ArrayRef,
    name: &str,
    offset: usize,
) -> Result<Vec<DateTime<Utc>>, FormatError> {
    let invalid = |i: usize, shown: String| -> FormatError {
        TickbarsError::invalid_value(name, Some(offset + i), shown).into()
    };

    match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let strings = cast(array, &DataType::Utf8).map_err(parquet_error)?;
            let strings = strings.as_string::<i32>();
            (0..strings.len())
                .map(|i| {
                    if strings.is_null(i) {
                        return Err(invalid(i, "null".to_string()));
                    }
                    let text = strings.value(i);
                    parse_timestamp(text).ok_or_else(|| invalid(i, text.to_string()))
                })
                .collect()
        }
        DataType::Int32 | DataType::Int64 => {
            let millis = cast(array, &DataType::Int64).map_err(parquet_error)?;
            let millis = millis.as_primitive::<Int64Type>();
            (0..millis.len())
                .map(|i| {
                    if millis.is_null(i) {
                        return Err(invalid(i, "null".to_string()));
                    }
                    DateTime::from_timestamp_millis(millis.value(i))
                        .ok_or_else(|| invalid(i, millis.value(i).to_string()))
                })
                .collect()
        }
        data_type => {
            let tz = match data_type {
                DataType::Timestamp(_, tz) => tz.clone(),
                _ => None,
            };
            let micros = cast(array, &DataType::Timestamp(TimeUnit::Microsecond, tz))
                .map_err(parquet_error)?;
            let micros = micros.as_primitive::<TimestampMicrosecondType>();
            (0..micros.len())
                .map(|i| {
                    if micros.is_null(i) {
                        return Err(invalid(i, "null".to_string()));
                    }
                    DateTime::from_timestamp_micros(micros.value(i))
                        .ok_or_else(|| invalid(i, micros.value(i).to_string()))
                })
                .collect()
        }
    }
}
