/// Document export module
///
/// This module handles:
/// - Planning: records -> ordered layout blocks (plan.rs)
/// - Rendering: blocks -> paginated PDF bytes (pdf.rs)
/// - The async export job that writes the file to disk
use std::path::PathBuf;
use thiserror::Error;

pub mod pdf;
pub mod plan;

use plan::Block;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of a completed export, reported back to the UI
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub skipped_images: usize,
}

/// Render the planned blocks and write the document to `path`.
///
/// Runs on a background task; image loading and serialization happen off
/// the update loop. Once started the job runs to completion or fails
/// outright - there is no cancellation.
pub async fn run_export(
    blocks: Vec<Block>,
    doc_title: String,
    path: PathBuf,
) -> Result<ExportSummary, ExportError> {
    let rendered = pdf::render(&blocks, &doc_title)?;

    tokio::fs::write(&path, &rendered.bytes)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(ExportSummary {
        path,
        pages: rendered.pages,
        skipped_images: rendered.skipped_images,
    })
}
