use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `linkcap`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the request pipeline continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum LinkcapError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Spreadsheet I/O ─────────────────────────────────────────────────
    #[error("spreadsheet: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    // ── Transport / Channel ─────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Spreadsheet errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("failed to open workbook: {0}")]
    Open(String),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("failed to read worksheet: {0}")]
    Read(String),

    #[error("failed to write workbook: {0}")]
    Write(String),
}

impl From<calamine::XlsxError> for SpreadsheetError {
    fn from(err: calamine::XlsxError) -> Self {
        Self::Read(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SpreadsheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Write(err.to_string())
    }
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Bot API method {method} failed: {description}")]
    Api { method: String, description: String },

    #[error("Bot API method {method} returned no {field}")]
    MissingField { method: String, field: String },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, LinkcapError>;
