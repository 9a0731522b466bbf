use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use tempfile::TempDir;

use linkcap::app::process_file;
use linkcap::channels::chunker::batch_messages;
use linkcap::error::{LinkcapError, SpreadsheetError};
use linkcap::links::DEFAULT_LINK_LIMIT;
use linkcap::messages::Messages;
use linkcap::rows::{RowResult, process_rows};
use linkcap::spreadsheet::{
    RESULT_HEADERS, read_first_column_from_bytes, result_document_bytes,
};

use crate::support::workbook_bytes;

fn result_rows(bytes: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range.rows().map(<[Data]>::to_vec).collect()
}

#[test]
fn upload_rows_become_summary_and_result_document() {
    let input = workbook_bytes(&[Some("http://a, http://b"), None, Some("notalink")]);
    let messages = Messages::default();

    let rows = read_first_column_from_bytes(&input).unwrap();
    let reports = process_rows(rows, DEFAULT_LINK_LIMIT, &messages);
    let displays: Vec<&str> = reports.iter().map(|r| r.display.as_str()).collect();

    assert_eq!(
        displays,
        vec!["Row 1: 2 links\nhttp://a\nhttp://b", "Row 3: no valid links"]
    );
    assert_eq!(
        batch_messages(&displays, 4000),
        vec!["Row 1: 2 links\nhttp://a\nhttp://b\n\nRow 3: no valid links".to_string()]
    );

    let results: Vec<RowResult> = reports.into_iter().map(|r| r.result).collect();
    let sheet = result_rows(result_document_bytes(&results).unwrap());

    assert_eq!(sheet.len(), 3);
    assert_eq!(
        sheet[0],
        RESULT_HEADERS
            .iter()
            .map(|h| Data::String((*h).to_string()))
            .collect::<Vec<_>>()
    );
    assert_eq!(sheet[1][0], Data::Float(1.0));
    assert_eq!(sheet[1][1], Data::Float(2.0));
    assert_eq!(sheet[1][2], Data::String("http://a\nhttp://b".into()));
    assert_eq!(sheet[2][0], Data::Float(3.0));
    assert_eq!(sheet[2][1], Data::Float(0.0));
}

#[test]
fn long_rows_are_capped_in_summary_and_export() {
    let row: Vec<String> = (0..11).map(|i| format!("http://x{i}")).collect();
    let joined = row.join(", ");
    let input = workbook_bytes(&[Some(&joined)]);

    let rows = read_first_column_from_bytes(&input).unwrap();
    let reports = process_rows(rows, DEFAULT_LINK_LIMIT, &Messages::default());

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].result.link_count, 10);
    assert!(reports[0].display.starts_with("Row 1: 10 links\n"));
    assert!(!reports[0].result.links.contains("http://x10"));
}

#[test]
fn many_rows_split_into_budgeted_chunks() {
    let cells: Vec<String> = (0..300)
        .map(|i| format!("https://example.com/path/{i}, https://example.org/{i}"))
        .collect();
    let refs: Vec<Option<&str>> = cells.iter().map(|c| Some(c.as_str())).collect();
    let input = workbook_bytes(&refs);

    let rows = read_first_column_from_bytes(&input).unwrap();
    let reports = process_rows(rows, DEFAULT_LINK_LIMIT, &Messages::default());
    let displays: Vec<&str> = reports.iter().map(|r| r.display.as_str()).collect();
    let chunks = batch_messages(&displays, 4000);

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= 4000));
    assert_eq!(chunks.join("\n\n"), displays.join("\n\n"));
}

#[test]
fn process_file_writes_output_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("links.xlsx");
    let output = dir.path().join("processed_links.xlsx");
    std::fs::write(&input, workbook_bytes(&[Some("http://a, ftp://b, http://c")])).unwrap();

    let summary = process_file(&input, &output, 10, 4000, &Messages::default()).unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.chunks, vec!["Row 1: 2 links\nhttp://a\nhttp://c"]);
    let sheet = result_rows(std::fs::read(&output).unwrap());
    assert_eq!(sheet.len(), 2);
}

#[test]
fn process_file_skips_output_when_no_rows() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.xlsx");
    let output = dir.path().join("processed_links.xlsx");
    std::fs::write(&input, workbook_bytes(&[None, Some("")])).unwrap();

    let summary = process_file(&input, &output, 10, 4000, &Messages::default()).unwrap();

    assert_eq!(summary.rows, 0);
    assert!(summary.chunks.is_empty());
    assert!(!output.exists());
}

#[test]
fn process_file_reads_the_selected_tab() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tabs.xlsx");
    let output = dir.path().join("processed_links.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "notalink").unwrap();
    notes.write_number(1, 0, 0).unwrap();
    let links = workbook.add_worksheet();
    links.set_name("Links").unwrap();
    links.write_string(0, 0, "http://active, http://tab").unwrap();
    links.write_number(1, 0, 0).unwrap();
    links.set_active(true);
    workbook.save(&input).unwrap();

    let summary = process_file(&input, &output, 10, 4000, &Messages::default()).unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(
        summary.chunks,
        vec!["Row 1: 2 links\nhttp://active\nhttp://tab"]
    );
}

#[test]
fn process_file_reports_unreadable_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xlsx");
    let output = dir.path().join("processed_links.xlsx");
    std::fs::write(&input, b"not a zip archive").unwrap();

    let err = process_file(&input, &output, 10, 4000, &Messages::default()).unwrap_err();

    assert!(matches!(
        err,
        LinkcapError::Spreadsheet(SpreadsheetError::Open(_))
    ));
    assert!(!output.exists());
}
