use super::types::{RowReport, RowResult, SheetRow};
use crate::links::extract_links;
use crate::messages::Messages;

/// Run the link extractor over every first-column value.
///
/// Rows without a value produce nothing. Rows with a value but no links still
/// produce a report with a zero count.
pub fn process_rows<I>(rows: I, limit: usize, messages: &Messages) -> Vec<RowReport>
where
    I: IntoIterator<Item = SheetRow>,
{
    rows.into_iter()
        .filter_map(|row| {
            let value = row.value.as_deref().filter(|v| !v.is_empty())?;
            Some(process_row(row.index, value, limit, messages))
        })
        .collect()
}

fn process_row(index: usize, value: &str, limit: usize, messages: &Messages) -> RowReport {
    let links = extract_links(value, limit);
    let link_count = links.len();
    let joined = links.join("\n");

    let display = if link_count == 0 {
        messages.row_without_links(index)
    } else {
        format!("{}\n{joined}", messages.row_with_links(index, link_count))
    };

    RowReport {
        display,
        result: RowResult {
            index,
            link_count,
            links: joined,
        },
    }
}
