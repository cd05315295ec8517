//! Document payload handed to the upload controller.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::path::Path;

/// MIME type sent with every upload. The picker only offers PDFs.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file selected by the user, fully read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    file_name: String,
    bytes: Vec<u8>,
}

impl Document {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// Read a document from disk. The file name is the last path component.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// True when `path` has a `.pdf` extension (case-insensitive).
#[must_use]
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
}
