use super::Router;
use crate::channels::chunker::batch_messages;
use crate::channels::traits::{Channel, IncomingDocument};
use crate::rows::{RowResult, process_rows};
use crate::spreadsheet::{RESULT_FILE_NAME, read_first_column, write_result_document};
use anyhow::{Context, Result};
use std::path::Path;
use tempfile::NamedTempFile;

pub(super) struct Outcome {
    pub rows: usize,
    pub chunks: usize,
}

/// Scratch file with a unique name, removed when the handle drops.
fn scratch_file(dir: &Path, prefix: &str) -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".xlsx")
        .tempfile_in(dir)
        .with_context(|| format!("create scratch file in {}", dir.display()))
}

impl Router {
    /// Download, summarize and export one upload.
    ///
    /// Both scratch files are owned by this frame, so every return path,
    /// including `?`, deletes them.
    pub(super) async fn process_spreadsheet(
        &self,
        channel: &dyn Channel,
        chat_id: &str,
        document: &IncomingDocument,
    ) -> Result<Outcome> {
        let bytes = channel
            .download_file(&document.file_id)
            .await
            .context("download spreadsheet")?;

        let input = scratch_file(&self.scratch_dir, "linkcap-upload-")?;
        tokio::fs::write(input.path(), &bytes)
            .await
            .context("store downloaded spreadsheet")?;

        let input_path = input.path().to_path_buf();
        let limit = self.limits.max_links_per_row;
        let messages = self.messages;
        let reports = tokio::task::spawn_blocking(move || {
            read_first_column(&input_path).map(|rows| process_rows(rows, limit, &messages))
        })
        .await
        .context("spreadsheet reader task failed")?
        .context("read spreadsheet")?;

        if reports.is_empty() {
            channel
                .send(self.messages.no_rows_with_links(), chat_id)
                .await?;
            return Ok(Outcome { rows: 0, chunks: 0 });
        }

        let displays: Vec<&str> = reports.iter().map(|r| r.display.as_str()).collect();
        let chunks = batch_messages(&displays, self.limits.message_budget);
        for chunk in &chunks {
            channel.send_chunked(chunk, chat_id).await?;
        }

        let results: Vec<RowResult> = reports.into_iter().map(|r| r.result).collect();
        let rows = results.len();

        let output = scratch_file(&self.scratch_dir, "linkcap-result-")?;
        let output_path = output.path().to_path_buf();
        tokio::task::spawn_blocking(move || write_result_document(&results, &output_path))
            .await
            .context("result writer task failed")?
            .context("write result document")?;

        let document_bytes = tokio::fs::read(output.path())
            .await
            .context("read result document")?;
        channel
            .send_document(
                document_bytes,
                RESULT_FILE_NAME,
                Some(self.messages.result_caption()),
                chat_id,
            )
            .await
            .context("send result document")?;

        Ok(Outcome {
            rows,
            chunks: chunks.len(),
        })
    }
}
