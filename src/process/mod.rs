// src/process/mod.rs
pub mod record;
pub mod utils;

use csv::{ReaderBuilder, StringRecord};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::error::{ConvertError, Result, RowError};
use record::{ColumnIndex, InputRecord, OutputRecord};

/// Emit a progress line every this many converted records.
pub const PROGRESS_EVERY: usize = 100;

/// Counters from one `convert` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted_count: usize,
    pub skipped_count: usize,
}

impl ConversionReport {
    pub fn total_rows(&self) -> usize {
        self.converted_count + self.skipped_count
    }
}

/// Convert the support-case CSV at `input_path` into JSONL at `output_path`.
///
/// - Fails with [`ConvertError::InputNotFound`] when the input is missing.
/// - Fails with [`ConvertError::MissingColumns`] before the output is created
///   when the header lacks a required column.
/// - Any per-row problem is logged and counted as a skip.
///
/// The output file is truncated on every call.
#[tracing::instrument(
    level = "info",
    skip(input_path, output_path),
    fields(input = %input_path.as_ref().display(), output = %output_path.as_ref().display())
)]
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
) -> Result<ConversionReport> {
    let input_path = input_path.as_ref();
    let start = Instant::now();

    let file = File::open(input_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConvertError::InputNotFound(input_path.to_path_buf()),
        _ => ConvertError::Io(e),
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows are handled per-row, not rejected by the reader
        .from_reader(BufReader::new(file));

    let columns =
        ColumnIndex::from_headers(rdr.headers()?).map_err(ConvertError::MissingColumns)?;
    debug!(?columns, "resolved header");

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);
    let report = write_records(&mut rdr, &columns, &mut out)?;
    out.flush()?;

    info!(
        converted = report.converted_count,
        skipped = report.skipped_count,
        elapsed = ?start.elapsed(),
        "conversion finished"
    );
    Ok(report)
}

/// Stream every data row of `rdr` into `out`, one JSON object per line.
fn write_records<R: Read, W: Write>(
    rdr: &mut csv::Reader<R>,
    columns: &ColumnIndex,
    out: &mut W,
) -> Result<ConversionReport> {
    let mut report = ConversionReport::default();
    let mut row = StringRecord::new();

    // row 1 is the header
    let mut row_num = 1;
    loop {
        row_num += 1;
        let line = match rdr.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => encode_row(&row, columns),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(RowError::from(e)),
        };

        match line {
            Ok(line) => {
                writeln!(out, "{}", line)?;
                report.converted_count += 1;
                if report.converted_count % PROGRESS_EVERY == 0 {
                    info!("Processed {} records...", report.converted_count);
                }
            }
            Err(reason) => {
                warn!(row = row_num, %reason, "skipping row");
                report.skipped_count += 1;
            }
        }
    }

    Ok(report)
}

fn encode_row(row: &StringRecord, columns: &ColumnIndex) -> std::result::Result<String, RowError> {
    let input = InputRecord::from_row(row, columns)?;
    let output = OutputRecord::try_from(&input)?;
    Ok(serde_json::to_string(&output)?)
}
