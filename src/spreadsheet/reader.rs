use crate::error::SpreadsheetError;
use crate::rows::SheetRow;
use calamine::{Data, Range, Reader, Xlsx, XlsxError, open_workbook_from_rs};
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;

const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Read column A of the workbook's active sheet.
///
/// Rows are numbered from 1 by their sheet position. Rows above the used
/// range are not returned since they are empty by definition.
pub fn read_first_column(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let bytes = std::fs::read(path)
        .map_err(|e| SpreadsheetError::Open(format!("{}: {e}", path.display())))?;
    read_first_column_from_bytes(&bytes)
}

pub fn read_first_column_from_bytes(bytes: &[u8]) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: XlsxError| SpreadsheetError::Open(e.to_string()))?;

    let names = workbook.sheet_names();
    let active = active_tab(bytes)?;
    // A stale activeTab pointing past the last sheet falls back to the first.
    let name = names
        .get(active)
        .or_else(|| names.first())
        .cloned()
        .ok_or(SpreadsheetError::NoWorksheet)?;

    let range = workbook.worksheet_range(&name)?;
    Ok(column_a(&range))
}

/// Index of the selected tab from `<workbookView activeTab="N"/>`. Excel
/// omits the attribute when the first sheet is active.
fn active_tab(bytes: &[u8]) -> Result<usize, SpreadsheetError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SpreadsheetError::Open(e.to_string()))?;
    let mut xml = String::new();
    match archive.by_name(WORKBOOK_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)
                .map_err(|e| SpreadsheetError::Read(format!("{WORKBOOK_PART}: {e}")))?;
        }
        Err(_) => return Ok(0),
    }

    let mut reader = quick_xml::Reader::from_str(&xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(tag) | Event::Empty(tag))
                if tag.local_name().as_ref() == b"workbookView" =>
            {
                let index = tag
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.local_name().as_ref() == b"activeTab")
                    .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.trim().parse().ok());
                return Ok(index.unwrap_or(0));
            }
            Ok(Event::Eof) => return Ok(0),
            Err(e) => return Err(SpreadsheetError::Read(format!("{WORKBOOK_PART}: {e}"))),
            Ok(_) => {}
        }
    }
}

fn column_a(range: &Range<Data>) -> Vec<SheetRow> {
    let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (start_row..=end_row)
        .map(|row| SheetRow {
            index: row as usize + 1,
            value: range.get_value((row, 0)).and_then(cell_text),
        })
        .collect()
}

/// Blank, zero and `false` cells count as having no value.
#[allow(clippy::float_cmp)]
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Int(0) | Data::Bool(false) => None,
        Data::Float(f) if *f == 0.0 => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
