//! Format dispatch over the calamine spreadsheet readers.
//!
//! All container parsing (cell iteration, workbook structure, cached formula
//! values) is delegated to calamine; this module only selects the right
//! reader for a file and unifies the per-format APIs behind one type.

use crate::error::XlHelperError;
use calamine::{open_workbook, Data, Ods, Range, Reader, Xls, Xlsb, Xlsx};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Buffered file reader shared by all format readers.
pub type FileReader = BufReader<File>;

/// Wrapper enum over the calamine readers for the supported formats.
pub enum Spreadsheet {
    /// Excel 2007+ format (.xlsx, .xlsm, .xlam)
    Xlsx(Xlsx<FileReader>),
    /// Excel Binary format (.xlsb)
    Xlsb(Xlsb<FileReader>),
    /// Legacy Excel format (.xls, .xla)
    Xls(Xls<FileReader>),
    /// OpenDocument format (.ods)
    Ods(Ods<FileReader>),
}

impl Spreadsheet {
    /// Opens a spreadsheet file read-only, picking the reader from the file
    /// extension.
    ///
    /// Formula cells are resolved to their last cached value by calamine; a
    /// cell that stores only formula text with no cached value comes back as
    /// whatever calamine reports for it.
    ///
    /// # Errors
    ///
    /// Returns [`XlHelperError::InvalidFileFormat`] for an unrecognized
    /// extension, or the per-format calamine error when the file is missing,
    /// unreadable, or corrupt.
    pub fn open<P>(path: P) -> Result<Spreadsheet, XlHelperError>
    where
        P: AsRef<Path>,
    {
        match path.as_ref().extension().and_then(OsStr::to_str) {
            Some("xlsx") | Some("xlsm") | Some("xlam") => Ok(Self::Xlsx(open_workbook(path)?)),
            Some("xlsb") => Ok(Self::Xlsb(open_workbook(path)?)),
            Some("xls") | Some("xla") => Ok(Self::Xls(open_workbook(path)?)),
            Some("ods") => Ok(Self::Ods(open_workbook(path)?)),
            _ => Err(XlHelperError::InvalidFileFormat {
                name: path.as_ref().to_string_lossy().to_string(),
            }),
        }
    }

    /// Returns the names of all sheets in the workbook, in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Xlsx(xlsx) => xlsx.sheet_names(),
            Self::Xlsb(xlsb) => xlsb.sheet_names(),
            Self::Xls(xls) => xls.sheet_names(),
            Self::Ods(ods) => ods.sheet_names(),
        }
    }

    /// Loads the populated cell range of the named sheet.
    ///
    /// The returned range is positioned at the sheet's populated extent: its
    /// `start`/`end` are the absolute coordinates of the first and last
    /// populated cells, and lookups outside it yield `None`.
    pub fn worksheet_range(&mut self, sheet_name: &str) -> Result<Range<Data>, XlHelperError> {
        match self {
            Self::Xlsx(xlsx) => Ok(xlsx.worksheet_range(sheet_name)?),
            Self::Xlsb(xlsb) => Ok(xlsb.worksheet_range(sheet_name)?),
            Self::Xls(xls) => Ok(xls.worksheet_range(sheet_name)?),
            Self::Ods(ods) => Ok(ods.worksheet_range(sheet_name)?),
        }
    }
}
