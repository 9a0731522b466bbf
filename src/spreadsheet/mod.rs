//! xlsx input and output.
//!
//! Reading goes through `calamine`, writing through `rust_xlsxwriter`. Both
//! sides are synchronous; async callers run them on the blocking pool.

pub mod reader;
pub mod writer;

/// MIME type Telegram reports for `.xlsx` uploads.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const XLSX_EXTENSION: &str = "xlsx";

pub use reader::{read_first_column, read_first_column_from_bytes};
pub use writer::{
    RESULT_FILE_NAME, RESULT_HEADERS, RESULT_SHEET_NAME, build_result_workbook,
    result_document_bytes, write_result_document,
};
