use crate::error::SpreadsheetError;
use crate::rows::RowResult;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const RESULT_SHEET_NAME: &str = "Results";
pub const RESULT_HEADERS: [&str; 3] = ["Row", "Link Count", "Links (up to 10)"];
/// Name the result document is sent under, whatever its scratch path.
pub const RESULT_FILE_NAME: &str = "processed_links.xlsx";

const LINKS_COLUMN_WIDTH: f64 = 60.0;

/// Header row followed by one row per result, in order. An empty `results`
/// slice gives a header-only workbook.
pub fn build_result_workbook(results: &[RowResult]) -> Result<Workbook, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(RESULT_SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, title) in (0u16..).zip(RESULT_HEADERS) {
        sheet.write_string_with_format(0, col, title, &bold)?;
    }

    let wrap = Format::new().set_text_wrap();
    for (row, result) in (1u32..).zip(results) {
        sheet.write_number(row, 0, cell_number(result.index)?)?;
        sheet.write_number(row, 1, cell_number(result.link_count)?)?;
        sheet.write_string_with_format(row, 2, &result.links, &wrap)?;
    }
    sheet.set_column_width(2, LINKS_COLUMN_WIDTH)?;

    Ok(workbook)
}

pub fn write_result_document(results: &[RowResult], path: &Path) -> Result<(), SpreadsheetError> {
    build_result_workbook(results)?.save(path)?;
    Ok(())
}

pub fn result_document_bytes(results: &[RowResult]) -> Result<Vec<u8>, SpreadsheetError> {
    Ok(build_result_workbook(results)?.save_to_buffer()?)
}

fn cell_number(value: usize) -> Result<f64, SpreadsheetError> {
    u32::try_from(value)
        .map(f64::from)
        .map_err(|_| SpreadsheetError::Write(format!("{value} does not fit in a cell")))
}
