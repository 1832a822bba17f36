use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a schedule workbook.
///
/// An unreadable workbook is the one terminal failure of a run; a missing
/// marker column or an unmatched sheet is not an error, those days just
/// contribute no cells.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        source: calamine::XlsxError,
    },
    #[error("failed to read sheet {sheet}: {source}")]
    SheetRead {
        sheet: String,
        source: calamine::XlsxError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
