//! Worksheet-to-record conversion.
//!
//! [`read_sheet`] opens a spreadsheet file, derives record keys from a header
//! row, and yields one key-value [`Record`] per data row below it. The
//! intended use is lightweight ETL: each record maps header text (optionally
//! sanitized and remapped) to the cell value in the same column.

use crate::error::XlHelperError;
use crate::reference::{column_to_index, index_to_column};
use crate::sanitize::sql_safe_string;
use crate::spreadsheet::Spreadsheet;
use calamine::{Data, Range};
use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// One output row: header-derived key to cell value, in header column order.
///
/// Built fresh for every data row; the reader keeps no reference to it after
/// yielding. Duplicate header keys are not deduplicated up front: inserting
/// the later column's value overwrites the earlier one while the key keeps
/// its first position, ordinary ordered-map semantics.
pub type Record = IndexMap<String, Data>;

/// Per-invocation configuration for [`read_sheet`].
///
/// Every invocation is independent; there is no shared state between reads.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Sheet selected by exact name; `None` picks the workbook's first sheet.
    pub sheet_name: Option<String>,
    /// 1-based row index of the header row (default 1).
    pub header_row: u32,
    /// Column letter marking the left boundary of the header scan and of
    /// every data row scan (default "A"). Columns left of it are ignored.
    pub start_col: String,
    /// Pass every header key through [`sql_safe_string`] before use.
    pub sql_safe: bool,
    /// Exact-match replacement table applied to header keys after
    /// sanitization. Keys not present are left unchanged.
    pub remapping: HashMap<String, String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            sheet_name: None,
            header_row: 1,
            start_col: "A".to_string(),
            sql_safe: false,
            remapping: HashMap::new(),
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a sheet by exact name instead of the workbook's first sheet.
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Sets the 1-based header row position.
    pub fn header_row(mut self, row: u32) -> Self {
        self.header_row = row;
        self
    }

    /// Sets the leftmost column of the header and data scans.
    pub fn start_col(mut self, column: impl Into<String>) -> Self {
        self.start_col = column.into();
        self
    }

    /// Sanitizes header keys with [`sql_safe_string`].
    pub fn sql_safe(mut self, enabled: bool) -> Self {
        self.sql_safe = enabled;
        self
    }

    /// Replaces header keys found in `remapping` by their mapped value.
    pub fn remapping(mut self, remapping: HashMap<String, String>) -> Self {
        self.remapping = remapping;
        self
    }
}

/// Reads a worksheet and returns a lazy sequence of [`Record`]s, one per data
/// row below the header row.
///
/// The header key sequence is derived once, scanning the header row from
/// `start_col` through the rightmost populated column: sanitization (if
/// `sql_safe`) first, then exact-name remapping. Data rows run from
/// `header_row + 1` through the bottommost populated row; each cell is paired
/// positionally with its header key. Empty header cells produce the
/// empty-string key; missing cells produce [`Data::Empty`] values.
///
/// The returned iterator owns everything it needs, so the file handle is
/// closed before this function returns; abandoning iteration early needs no
/// cleanup. The sequence is finite and not restartable: call again to
/// re-scan.
///
/// # Errors
///
/// All failures surface here, before any record is produced: file access and
/// format errors from the collaborator, [`SheetNotFound`] for an unknown
/// `sheet_name`, [`EmptySheet`] / [`HeaderRowOutOfRange`] when the header row
/// cannot lie within the populated extent, and invalid `header_row` /
/// `start_col` values.
///
/// [`SheetNotFound`]: XlHelperError::SheetNotFound
/// [`EmptySheet`]: XlHelperError::EmptySheet
/// [`HeaderRowOutOfRange`]: XlHelperError::HeaderRowOutOfRange
pub fn read_sheet<P>(path: P, options: ReadOptions) -> Result<Records, XlHelperError>
where
    P: AsRef<Path>,
{
    if options.header_row == 0 {
        return Err(XlHelperError::InvalidHeaderRow {
            header_row: options.header_row,
        });
    }
    let start_col = column_to_index(&options.start_col)?;

    let mut spreadsheet = Spreadsheet::open(&path)?;
    let sheet = match &options.sheet_name {
        Some(name) => {
            if !spreadsheet.sheet_names().iter().any(|n| n == name) {
                return Err(XlHelperError::SheetNotFound { name: name.clone() });
            }
            name.clone()
        }
        None => spreadsheet
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| XlHelperError::NoSheets {
                name: path.as_ref().to_string_lossy().to_string(),
            })?,
    };

    let range = spreadsheet.worksheet_range(&sheet)?;
    let (last_row, last_col) = range
        .end()
        .ok_or_else(|| XlHelperError::EmptySheet {
            sheet: sheet.clone(),
        })?;

    // 0-based absolute row of the header within the sheet
    let header_row = options.header_row - 1;
    if header_row > last_row {
        return Err(XlHelperError::HeaderRowOutOfRange {
            header_row: options.header_row,
            last_row: last_row + 1,
            sheet,
        });
    }

    let headers = header_keys(&range, header_row, start_col, last_col, &options);
    debug!(
        "sheet '{}': columns {}..={}, data rows {}..={}, header keys {:?}",
        sheet,
        index_to_column(start_col),
        index_to_column(last_col),
        header_row + 2,
        last_row + 1,
        headers,
    );

    Ok(Records {
        headers,
        range,
        start_col,
        next_row: header_row + 1,
        last_row,
    })
}

/// Builds the header key sequence for one invocation.
///
/// Scans the header row left to right from `start_col` through `last_col`,
/// applying sanitization then remapping as configured. A `start_col` right of
/// `last_col` yields an empty sequence.
fn header_keys(
    range: &Range<Data>,
    header_row: u32,
    start_col: u32,
    last_col: u32,
    options: &ReadOptions,
) -> Vec<String> {
    (start_col..=last_col)
        .map(|col| {
            let title = range
                .get_value((header_row, col))
                .map(header_title)
                .unwrap_or_default();
            let key = if options.sql_safe {
                sql_safe_string(&title)
            } else {
                title
            };
            match options.remapping.get(&key) {
                Some(replacement) => replacement.clone(),
                None => key,
            }
        })
        .collect()
}

/// Converts a header cell value to its key text. Empty cells become `""`.
fn header_title(value: &Data) -> String {
    match value {
        Data::String(text) => text.clone(),
        Data::Bool(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::DateTime(datetime) => datetime
            .as_datetime()
            .map(|value| value.to_string())
            .unwrap_or_else(|| datetime.as_f64().to_string()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Error(error) => error.to_string(),
        Data::Empty => String::new(),
    }
}

/// Lazy, forward-only, single-pass sequence of [`Record`]s.
///
/// Owns the loaded cell range and the resolved header keys; dropping it
/// mid-iteration releases everything.
pub struct Records {
    headers: Vec<String>,
    range: Range<Data>,
    start_col: u32,
    next_row: u32,
    last_row: u32,
}

impl Records {
    /// The resolved header key sequence, in left-to-right column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.next_row > self.last_row {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;

        let mut record = Record::with_capacity(self.headers.len());
        for (offset, key) in self.headers.iter().enumerate() {
            let value = self
                .range
                .get_value((row, self.start_col + offset as u32))
                .cloned()
                .unwrap_or(Data::Empty);
            record.insert(key.clone(), value);
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last_row + 1).saturating_sub(self.next_row) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Records {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_range() -> Range<Data> {
        // | Name  | Order # | Date       |
        // | Alice | 7       | 2024-05-01 |
        // | Bob   |         | 2024-05-02 |
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String("Order #".to_string()));
        range.set_value((0, 2), Data::String("Date".to_string()));
        range.set_value((1, 0), Data::String("Alice".to_string()));
        range.set_value((1, 1), Data::Int(7));
        range.set_value((1, 2), Data::String("2024-05-01".to_string()));
        range.set_value((2, 0), Data::String("Bob".to_string()));
        range.set_value((2, 2), Data::String("2024-05-02".to_string()));
        range
    }

    #[test]
    fn header_keys_plain() {
        let range = sample_range();
        let keys = header_keys(&range, 0, 0, 2, &ReadOptions::new());
        assert_eq!(keys, vec!["Name", "Order #", "Date"]);
    }

    #[test]
    fn header_keys_sql_safe() {
        let range = sample_range();
        let keys = header_keys(&range, 0, 0, 2, &ReadOptions::new().sql_safe(true));
        assert_eq!(keys, vec!["Name", "Order_", "Date"]);
    }

    #[test]
    fn header_keys_remapped_after_sanitization() {
        let range = sample_range();
        let remapping = HashMap::from([
            ("Order_".to_string(), "order_no".to_string()),
            ("missing".to_string(), "unused".to_string()),
        ]);
        let options = ReadOptions::new().sql_safe(true).remapping(remapping);
        let keys = header_keys(&range, 0, 0, 2, &options);
        assert_eq!(keys, vec!["Name", "order_no", "Date"]);
    }

    #[test]
    fn header_keys_respect_start_col() {
        let range = sample_range();
        let keys = header_keys(&range, 0, 1, 2, &ReadOptions::new());
        assert_eq!(keys, vec!["Order #", "Date"]);
    }

    #[test]
    fn header_keys_empty_when_start_col_past_extent() {
        let range = sample_range();
        let keys = header_keys(&range, 0, 5, 2, &ReadOptions::new());
        assert!(keys.is_empty());
    }

    #[test]
    fn header_title_non_string_cells() {
        assert_eq!(header_title(&Data::Int(42)), "42");
        assert_eq!(header_title(&Data::Float(1.5)), "1.5");
        assert_eq!(header_title(&Data::Bool(true)), "true");
        assert_eq!(header_title(&Data::Empty), "");
    }

    #[test]
    fn records_pair_cells_with_headers() {
        let range = sample_range();
        let options = ReadOptions::new();
        let mut records = Records {
            headers: header_keys(&range, 0, 0, 2, &options),
            range,
            start_col: 0,
            next_row: 1,
            last_row: 2,
        };
        assert_eq!(records.len(), 2);

        let alice = records.next().unwrap();
        assert_eq!(alice["Name"], Data::String("Alice".to_string()));
        assert_eq!(alice["Order #"], Data::Int(7));

        let bob = records.next().unwrap();
        assert_eq!(bob["Name"], Data::String("Bob".to_string()));
        // Unpopulated cell in a populated row comes back as Empty
        assert_eq!(bob["Order #"], Data::Empty);

        assert!(records.next().is_none());
        assert_eq!(records.len(), 0);
    }

    #[test]
    fn records_preserve_header_order() {
        let range = sample_range();
        let options = ReadOptions::new();
        let mut records = Records {
            headers: header_keys(&range, 0, 0, 2, &options),
            range,
            start_col: 0,
            next_row: 1,
            last_row: 2,
        };
        let record = records.next().unwrap();
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, vec!["Name", "Order #", "Date"]);
    }

    #[test]
    fn duplicate_headers_last_write_wins() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String("Name".to_string()));
        range.set_value((1, 0), Data::String("first".to_string()));
        range.set_value((1, 1), Data::String("second".to_string()));

        let options = ReadOptions::new();
        let mut records = Records {
            headers: header_keys(&range, 0, 0, 1, &options),
            range,
            start_col: 0,
            next_row: 1,
            last_row: 1,
        };
        let record = records.next().unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record["Name"], Data::String("second".to_string()));
    }
}
