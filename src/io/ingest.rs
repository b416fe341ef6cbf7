//! CSV ingest and normalization.
//!
//! Turns one source file into a sequence of [`Record`]s:
//!
//! - the first line is the header; later lines align to it by position
//! - `time` is normalized to epoch seconds (see `domain::time`)
//! - `open`/`high`/`low`/`close`/`volume` are parsed as `f64`
//! - any other column is ignored
//!
//! Bad cells never drop a row. An unparsable `time` keeps its original text and
//! an unparsable number becomes NaN; both are counted and reported once per file.

use std::borrow::Cow;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::ByteRecord;
use tracing::{debug, warn};

use crate::domain::time::parse_epoch_seconds;
use crate::domain::{Record, RecordTime};
use crate::error::ConvertError;

/// Header positions of the recognized columns, resolved once per file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    pub time: Option<usize>,
    pub open: Option<usize>,
    pub high: Option<usize>,
    pub low: Option<usize>,
    pub close: Option<usize>,
    pub volume: Option<usize>,
}

impl ColumnIndex {
    pub fn from_headers(headers: &ByteRecord) -> Self {
        let mut columns = ColumnIndex::default();
        for (idx, name) in headers.iter().enumerate() {
            let slot = match normalize_header_name(&String::from_utf8_lossy(name)).as_str() {
                "time" => &mut columns.time,
                "open" => &mut columns.open,
                "high" => &mut columns.high,
                "low" => &mut columns.low,
                "close" => &mut columns.close,
                "volume" => &mut columns.volume,
                _ => continue,
            };
            // First occurrence wins when a header repeats a column name.
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
        columns
    }
}

/// Cells that could not be parsed and were kept in degraded form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DegradedCells {
    pub times: usize,
    pub numbers: usize,
    /// `(line, raw cell)` of the first bad time.
    pub first_time: Option<(usize, String)>,
    /// `(line, column, raw cell)` of the first bad number.
    pub first_number: Option<(usize, &'static str, String)>,
}

impl DegradedCells {
    pub fn is_empty(&self) -> bool {
        self.times == 0 && self.numbers == 0
    }

    fn note_time(&mut self, line: usize, raw: &str) {
        debug!(line, raw, "unparsable time cell kept as text");
        self.times += 1;
        if self.first_time.is_none() {
            self.first_time = Some((line, raw.to_string()));
        }
    }

    fn note_number(&mut self, line: usize, column: &'static str, raw: &str) {
        debug!(line, column, raw, "unparsable numeric cell kept as NaN");
        self.numbers += 1;
        if self.first_number.is_none() {
            self.first_number = Some((line, column, raw.to_string()));
        }
    }
}

/// Ingest output for one source file.
#[derive(Debug, Clone, Default)]
pub struct IngestedSource {
    /// Records in source row order.
    pub records: Vec<Record>,
    pub columns: ColumnIndex,
    pub degraded: DegradedCells,
}

/// Read and parse a source CSV file.
///
/// Returns [`ConvertError::SourceFileMissing`] when the file is gone; the
/// caller treats that as a per-file skip.
pub fn read_source(path: &Path) -> Result<IngestedSource, ConvertError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConvertError::SourceFileMissing {
            path: path.to_path_buf(),
        },
        _ => ConvertError::ReadSource {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let ingested = parse_records(file).map_err(|source| ConvertError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    if !ingested.degraded.is_empty() {
        report_degraded(path, &ingested.degraded);
    }
    Ok(ingested)
}

/// Parse CSV content (header + data rows) from any reader.
///
/// Rows are read as bytes and only recognized cells are decoded, lossily, so
/// invalid UTF-8 degrades a cell instead of failing the file.
pub fn parse_records<R: std::io::Read>(input: R) -> Result<IngestedSource, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let columns = ColumnIndex::from_headers(reader.byte_headers()?);

    let mut records = Vec::new();
    let mut degraded = DegradedCells::default();

    for (idx, result) in reader.byte_records().enumerate() {
        // +2: header is line 1, and lines are 1-based.
        let line = idx + 2;
        let row = result?;
        records.push(parse_row(&row, &columns, line, &mut degraded));
    }

    Ok(IngestedSource {
        records,
        columns,
        degraded,
    })
}

fn parse_row(row: &ByteRecord, columns: &ColumnIndex, line: usize, degraded: &mut DegradedCells) -> Record {
    let time = columns.time.and_then(|idx| match row.get(idx).map(decode_cell) {
        Some(cell) => match parse_epoch_seconds(&cell) {
            Some(secs) => Some(RecordTime::Epoch(secs)),
            None => {
                degraded.note_time(line, &cell);
                Some(RecordTime::Raw(cell.into_owned()))
            }
        },
        None => {
            degraded.note_time(line, "");
            None
        }
    });

    let mut number = |idx: Option<usize>, column: &'static str| {
        idx.map(|idx| {
            let cell = row.get(idx).map(decode_cell).unwrap_or_default();
            parse_f64(&cell).unwrap_or_else(|| {
                degraded.note_number(line, column, &cell);
                f64::NAN
            })
        })
    };

    Record {
        time,
        open: number(columns.open, "open"),
        high: number(columns.high, "high"),
        low: number(columns.low, "low"),
        close: number(columns.close, "close"),
        volume: number(columns.volume, "volume"),
    }
}

fn report_degraded(path: &Path, degraded: &DegradedCells) {
    if let Some((line, raw)) = &degraded.first_time {
        warn!(
            file = %path.display(),
            count = degraded.times,
            first_line = line,
            first_value = %raw,
            "unparsable time cells kept as original text"
        );
    }
    if let Some((line, column, raw)) = &degraded.first_number {
        warn!(
            file = %path.display(),
            count = degraded.numbers,
            first_line = line,
            first_column = column,
            first_value = %raw,
            "unparsable numeric cells kept as NaN"
        );
    }
}

fn decode_cell(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(text: &str) -> IngestedSource {
        parse_records(text.as_bytes()).unwrap()
    }

    #[test]
    fn parses_full_ohlcv_rows() {
        let out = parse(
            "time,open,high,low,close,volume\n\
             2024-05-01 00:00:00,1,2,0.5,1.5,100\n\
             2024-05-01 01:00:00,1.5,2.5,1,2,200\n",
        );
        assert_eq!(out.records.len(), 2);
        let r = &out.records[1];
        assert_eq!(r.time, Some(RecordTime::Epoch(1_714_525_200)));
        assert_eq!(r.open, Some(1.5));
        assert_eq!(r.high, Some(2.5));
        assert_eq!(r.low, Some(1.0));
        assert_eq!(r.close, Some(2.0));
        assert_eq!(r.volume, Some(200.0));
        assert!(out.degraded.is_empty());
    }

    #[test]
    fn header_only_file_yields_no_records() {
        assert!(parse("time,open,high,low,close,volume\n").records.is_empty());
        assert!(parse("").records.is_empty());
    }

    #[test]
    fn unknown_columns_are_ignored_and_absent_ones_stay_none() {
        let out = parse("Time,Close,trades\n2024-05-01,10,7\n");
        let r = &out.records[0];
        assert_eq!(r.time, Some(RecordTime::Epoch(1_714_521_600)));
        assert_eq!(r.close, Some(10.0));
        assert_eq!(r.open, None);
        assert_eq!(r.volume, None);
        let json = serde_json::to_string(r).unwrap();
        assert_eq!(json, r#"{"time":1714521600,"close":10.0}"#);
    }

    #[test]
    fn bom_prefixed_header_is_recognized() {
        let out = parse("\u{feff}time,close\n2024-05-01,1\n");
        assert_eq!(out.columns.time, Some(0));
        assert_eq!(out.records[0].time, Some(RecordTime::Epoch(1_714_521_600)));
    }

    #[test]
    fn degraded_cells_keep_the_row() {
        let out = parse(
            "time,open,close\n\
             someday,1,abc\n\
             2024-05-01,,2\n",
        );
        assert_eq!(out.records.len(), 2);

        let first = &out.records[0];
        assert_eq!(first.time, Some(RecordTime::Raw("someday".to_string())));
        assert_eq!(first.open, Some(1.0));
        assert!(first.close.unwrap().is_nan());

        let second = &out.records[1];
        assert!(second.open.unwrap().is_nan());
        assert_eq!(second.close, Some(2.0));

        assert_eq!(out.degraded.times, 1);
        assert_eq!(out.degraded.numbers, 2);
        assert_eq!(out.degraded.first_time, Some((2, "someday".to_string())));
        assert_eq!(out.degraded.first_number, Some((2, "close", "abc".to_string())));
    }

    #[test]
    fn short_rows_are_padded_with_degraded_values() {
        let out = parse("time,open,close\n2024-05-01,1\n,\n");
        assert_eq!(out.records.len(), 2);
        assert!(out.records[0].close.unwrap().is_nan());
        // An empty time cell is still a cell: kept as text.
        assert_eq!(out.records[1].time, Some(RecordTime::Raw(String::new())));
    }

    #[test]
    fn missing_file_is_a_recoverable_error() {
        let dir = TempDir::new().unwrap();
        let err = read_source(&dir.path().join("BTCUSDT-1h-x.csv")).unwrap_err();
        assert!(matches!(err, ConvertError::SourceFileMissing { .. }));
    }

    #[test]
    fn invalid_utf8_in_ignored_column_is_harmless() {
        let out = parse_records(&b"time,close,note\n2024-05-01,1,caf\xE9\n2024-05-02,2,ok\n"[..]).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].close, Some(1.0));
        assert!(out.degraded.is_empty());
    }

    #[test]
    fn invalid_utf8_in_recognized_cell_is_degraded() {
        let out = parse_records(&b"time,close\n2024-05-01,1\xE9\n\xFF,2\n"[..]).unwrap();
        assert_eq!(out.records.len(), 2);
        assert!(out.records[0].close.unwrap().is_nan());
        assert_eq!(out.records[1].time, Some(RecordTime::Raw("\u{FFFD}".to_string())));
        assert_eq!(out.records[1].close, Some(2.0));
        assert_eq!(out.degraded.numbers, 1);
        assert_eq!(out.degraded.times, 1);
    }

    #[test]
    fn reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("BTCUSDT-1h-x.csv");
        std::fs::write(&path, "time,close\n2024-05-01,1\n2024-05-02,2\n").unwrap();
        let out = read_source(&path).unwrap();
        assert_eq!(out.records.len(), 2);
    }
}
