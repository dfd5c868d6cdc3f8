use crate::error::FormError;
use crate::utils::mime::MimeUtils;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one pick. Picking the same path twice yields two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    pub id: FileId,
    pub name: String,
    pub mime: &'static str,
    pub bytes: Arc<[u8]>,
    pub source: Option<PathBuf>,
}

impl SelectedFile {
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let bytes = fs::read(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            id: FileId::new(),
            name,
            mime: MimeUtils::from_path(path),
            bytes: bytes.into(),
            source: Some(path.to_path_buf()),
        })
    }

    #[cfg(test)]
    pub fn from_bytes(name: impl Into<String>, mime: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            id: FileId::new(),
            name: name.into(),
            mime,
            bytes: bytes.into(),
            source: None,
        }
    }

    pub fn is_image(&self) -> bool {
        MimeUtils::is_image(self.mime)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_bytes_and_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dent.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"\x89PNG fake").unwrap();

        let selected = SelectedFile::load(&path).unwrap();
        assert_eq!(selected.name, "dent.png");
        assert_eq!(selected.mime, "image/png");
        assert_eq!(&selected.bytes[..], b"\x89PNG fake");
        assert_eq!(selected.source.as_deref(), Some(path.as_path()));
        assert!(selected.is_image());
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.pdf");
        let err = SelectedFile::load(&path).unwrap_err();
        assert!(matches!(err, FormError::Io { .. }));
    }

    #[test]
    fn each_pick_gets_a_fresh_id() {
        let a = SelectedFile::from_bytes("a.png", "image/png", vec![1]);
        let b = SelectedFile::from_bytes("a.png", "image/png", vec![1]);
        assert_ne!(a.id, b.id);
    }
}
