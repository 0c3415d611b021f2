use calamine::{OdsError, XlsError, XlsbError, XlsxError};
use thiserror::Error;

/// Error type for all xlhelper operations.
///
/// File access and container parsing failures come from calamine and are
/// wrapped per format; everything else is a configuration problem that is
/// reported before any record is yielded.
#[derive(Error, Debug)]
pub enum XlHelperError {
    /// Error in Excel 2007+ format (.xlsx, .xlsm, .xlam)
    #[error("invalid xlsx file: {0}")]
    Xlsx(#[from] XlsxError),

    /// Error in Excel Binary format (.xlsb)
    #[error("invalid xlsb file: {0}")]
    Xlsb(#[from] XlsbError),

    /// Error in legacy Excel format (.xls, .xla)
    #[error("invalid xls file: {0}")]
    Xls(#[from] XlsError),

    /// Error in OpenDocument format (.ods)
    #[error("invalid ods file: {0}")]
    Ods(#[from] OdsError),

    /// Unsupported or unrecognized file extension
    #[error("cannot detect spreadsheet format for '{name}'")]
    InvalidFileFormat { name: String },

    /// Requested sheet name does not exist in the workbook
    #[error("sheet '{name}' not found in workbook")]
    SheetNotFound { name: String },

    /// No sheet name was given and the workbook contains no sheets
    #[error("workbook '{name}' contains no sheets")]
    NoSheets { name: String },

    /// The worksheet reports no populated extent
    #[error("sheet '{sheet}' is empty; did you set header_row correctly?")]
    EmptySheet { sheet: String },

    /// Header row positions are 1-based
    #[error("header_row {header_row} is invalid; positions are 1-based")]
    InvalidHeaderRow { header_row: u32 },

    /// The configured header row lies below the last populated row
    #[error(
        "header_row {header_row} is past the last populated row {last_row} \
         of sheet '{sheet}'; did you set header_row correctly?"
    )]
    HeaderRowOutOfRange {
        header_row: u32,
        last_row: u32,
        sheet: String,
    },

    /// `start_col` must be a column letter such as "A" or "AB"
    #[error("'{column}' is not a valid column letter")]
    InvalidColumnReference { column: String },
}
