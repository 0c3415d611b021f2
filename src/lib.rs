//! # xlhelper
//!
//! Lightweight extraction of tabular data from spreadsheet files for ETL
//! pipelines, without pulling in a full dataframe library. A worksheet is
//! exposed as a lazy sequence of key-value records: the header row supplies
//! the keys, every row below it becomes one [`Record`].
//!
//! ## Features
//!
//! - **Multi-format input**: Excel files (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`,
//!   `.xla`, `.xlam`) and OpenDocument spreadsheets (`.ods`), parsed by
//!   calamine with formulas resolved to their cached values
//! - **Header-keyed records**: order-preserving maps from header text to cell
//!   value, one per data row
//! - **SQL-safe keys**: optional sanitization of header keys into identifier
//!   form, plus exact-name remapping
//! - **Typed errors**: missing sheets and misconfigured header rows are
//!   reported as distinct error kinds before any row is produced
//!
//! ## Example
//!
//! ```no_run
//! use xlhelper::{read_sheet, ReadOptions};
//!
//! # fn main() -> Result<(), xlhelper::XlHelperError> {
//! let records = read_sheet(
//!     "orders.xlsx",
//!     ReadOptions::new().header_row(1).sql_safe(true),
//! )?;
//! for record in records {
//!     println!("{:?}", record.get("Order_Date"));
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod reader;
mod reference;
mod sanitize;
mod spreadsheet;

pub use calamine::Data;
pub use error::XlHelperError;
pub use reader::{read_sheet, ReadOptions, Record, Records};
pub use reference::{column_to_index, index_to_column};
pub use sanitize::sql_safe_string;
pub use spreadsheet::Spreadsheet;
