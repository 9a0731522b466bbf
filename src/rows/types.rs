/// One first-column cell of the uploaded sheet.
///
/// `index` is the 1-based sheet row, so gaps left by skipped rows stay visible
/// in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub index: usize,
    pub value: Option<String>,
}

/// Per-row outcome exported to the result document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResult {
    pub index: usize,
    pub link_count: usize,
    /// Capped links joined by `'\n'`; empty when `link_count` is zero.
    pub links: String,
}

/// Display line plus structured result for a processed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub display: String,
    pub result: RowResult,
}
