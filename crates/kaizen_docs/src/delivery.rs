//! Handing finished exports over to the host.

use kaizen_core::{ExportConfig, ExportError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::export::ExportedFile;

/// Destination for a finished export.
pub trait FileDelivery: Send + Sync {
    /// Deliver the file and return where it ended up.
    fn deliver(&self, file: &ExportedFile) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory.
///
/// Each file is written to a temporary file in the target directory and
/// renamed into place, so a half-written export is never visible under its
/// final name. An existing file with the same name is replaced.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Deliver into `output_dir`, or `~/.kaizen/exports` when unset.
    pub fn from_config(config: &ExportConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.exports_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<(), ExportError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| {
                ExportError::Delivery(format!(
                    "Failed to create export directory {}: {e}",
                    self.dir.display()
                ))
            })?;
        }
        Ok(())
    }
}

/// Keep the file inside the target directory whatever the title contained.
fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "export".to_string(),
        _ => cleaned,
    }
}

impl FileDelivery for DirectoryDelivery {
    fn deliver(&self, file: &ExportedFile) -> Result<PathBuf, ExportError> {
        self.ensure_dir()?;
        let path = self.dir.join(safe_file_name(&file.file_name));

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| ExportError::Delivery(format!("Failed to create temp file: {e}")))?;
        tmp.write_all(&file.bytes)
            .and_then(|_| tmp.flush())
            .map_err(|e| ExportError::Delivery(format!("Failed to write export: {e}")))?;
        tmp.persist(&path).map_err(|e| {
            ExportError::Delivery(format!("Failed to move export to {}: {}", path.display(), e.error))
        })?;

        info!(path = %path.display(), bytes = file.bytes.len(), "Export delivered");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str, bytes: &[u8]) -> ExportedFile {
        ExportedFile {
            file_name: name.into(),
            mime_type: "application/pdf",
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_deliver_writes_file() {
        let tmp = TempDir::new().unwrap();
        let delivery = DirectoryDelivery::new(tmp.path().join("out"));
        let path = delivery.deliver(&file("Laporan_A.pdf", b"%PDF-1.4")).unwrap();
        assert_eq!(path, tmp.path().join("out").join("Laporan_A.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_deliver_replaces_existing() {
        let tmp = TempDir::new().unwrap();
        let delivery = DirectoryDelivery::new(tmp.path());
        delivery.deliver(&file("a.doc", b"old")).unwrap();
        let path = delivery.deliver(&file("a.doc", b"new")).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_path_separators_are_neutralised() {
        let tmp = TempDir::new().unwrap();
        let delivery = DirectoryDelivery::new(tmp.path());
        let path = delivery.deliver(&file("../etc/passwd.pdf", b"x")).unwrap();
        assert_eq!(path.parent().unwrap(), tmp.path());
        assert_eq!(path.file_name().unwrap(), ".._etc_passwd.pdf");
    }

    #[test]
    fn test_safe_file_name_edge_cases() {
        assert_eq!(safe_file_name(""), "export");
        assert_eq!(safe_file_name(".."), "export");
        assert_eq!(safe_file_name("a\\b"), "a_b");
    }

    #[test]
    fn test_from_config_uses_output_dir() {
        let tmp = TempDir::new().unwrap();
        let config = ExportConfig {
            output_dir: Some(tmp.path().to_path_buf()),
            ..Default::default()
        };
        let delivery = DirectoryDelivery::from_config(&config).unwrap();
        assert_eq!(delivery.dir(), tmp.path());
    }
}
