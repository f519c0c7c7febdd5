use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("anchor label '{label}' not found on page {page}")]
    AnchorNotFound { page: u32, label: String },

    #[error("no table detected on page {page}")]
    TableNotFound { page: u32 },

    #[error("table on page {page} is malformed: row {row} has {found} cells, expected {expected}")]
    MalformedTable {
        page: u32,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("header schema mismatch on page {page}: expected {expected}, found {found}")]
    SchemaMismatch {
        page: u32,
        expected: String,
        found: String,
    },

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ExtractError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("PDF renderer failed on page {page}")]
    PdfRender { page: u32 },

    #[error("invalid page selection: {0}")]
    InvalidPageSelection(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,
}

impl ExtractError {
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ Self::InFile { .. } => already,
            other => Self::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    #[must_use]
    pub fn root(&self) -> &ExtractError {
        match self {
            Self::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<u32> {
        match self.root() {
            Self::AnchorNotFound { page, .. }
            | Self::TableNotFound { page }
            | Self::MalformedTable { page, .. }
            | Self::SchemaMismatch { page, .. }
            | Self::PdfRender { page } => Some(*page),
            _ => None,
        }
    }
}
