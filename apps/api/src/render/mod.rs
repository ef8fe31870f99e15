//! PDF rendering of a laid-out sheet.
//!
//! Everything here is synchronous and CPU-bound; async callers run it inside
//! `tokio::task::spawn_blocking`.

pub mod encoding;
pub mod pdf;

use thiserror::Error;

pub use pdf::{grid_fits_page, render_sheet};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("sheet does not fit the page: {0}")]
    Layout(String),
}
