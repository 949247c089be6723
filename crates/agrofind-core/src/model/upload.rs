use std::path::{Path, PathBuf};

use crate::error::{AgrofindError, Result};

/// Message shown when the chosen file is not a PDF.
pub const INVALID_FILE_TYPE: &str = "Por favor, selecione um arquivo PDF válido";

/// Message shown when an upload is attempted with no file selected.
pub const NO_FILE_SELECTED: &str = "Selecione um arquivo primeiro";

/// A file chosen for upload: path plus the metadata the form displays.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl SelectedFile {
    /// Validate and stat a candidate file.
    ///
    /// The declared media type (from the path's extension) must be
    /// `application/pdf`; anything else is rejected before any I/O, and the
    /// remote service is never contacted for an invalid selection.
    pub fn select(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime != mime_guess::mime::APPLICATION_PDF {
            return Err(AgrofindError::InvalidInput(INVALID_FILE_TYPE.to_string()));
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AgrofindError::InvalidInput(format!("caminho inválido: {}", path.display()))
            })?;

        let size = std::fs::metadata(path).map(|m| m.len()).map_err(|_| {
            AgrofindError::InvalidInput(format!("Arquivo não encontrado: {}", path.display()))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            filename,
            size,
        })
    }

    /// Size in megabytes, as shown next to the filename in the form.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / 1024.0 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_pdf(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("agrofind-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, b"%PDF-1.4 fake").unwrap();
        path
    }

    #[test]
    fn test_select_rejects_non_pdf() {
        // Validation happens before any filesystem access
        let err = SelectedFile::select("/nonexistent/notas.txt").unwrap_err();
        match err {
            AgrofindError::InvalidInput(msg) => assert_eq!(msg, INVALID_FILE_TYPE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select_rejects_extensionless_path() {
        let err = SelectedFile::select("/nonexistent/arquivo").unwrap_err();
        match err {
            AgrofindError::InvalidInput(msg) => assert_eq!(msg, INVALID_FILE_TYPE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select_missing_pdf() {
        let err = SelectedFile::select("/nonexistent/safra.pdf").unwrap_err();
        match err {
            AgrofindError::InvalidInput(msg) => assert!(msg.contains("não encontrado")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select_valid_pdf() {
        let path = temp_pdf("relatorio-safra.pdf");
        let file = SelectedFile::select(&path).unwrap();
        assert_eq!(file.filename, "relatorio-safra.pdf");
        assert_eq!(file.size, b"%PDF-1.4 fake".len() as u64);
        assert!(file.size_mb() < 1.0);
        std::fs::remove_file(path).ok();
    }
}
