//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.

use thiserror::Error;

/// Main error type for etiqueta operations.
///
/// Every failure is a synchronous return-path failure; the engine never
/// retries internally and never returns a partially rendered raster.
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Malformed template, detected before any rendering work begins
    #[error("Validation error: {0}")]
    Validation(String),

    /// Layout or encoding became infeasible mid-pipeline
    #[error("Render error: {0}")]
    Render(String),

    /// No font candidate could be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// A `{qr=field}` token referenced a field absent from the data record
    #[error("Data error: {0}")]
    Data(String),

    /// I/O error wrapper (font file reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
