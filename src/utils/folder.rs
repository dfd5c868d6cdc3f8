use super::mime::MimeUtils;
use ignore::Walk;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct FolderUtils;

impl FolderUtils {
    /// Image files under `folder`, honouring .gitignore/.ignore rules, in path order.
    pub fn image_paths(folder: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for result in Walk::new(folder) {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && MimeUtils::is_image(MimeUtils::from_path(path)) {
                        paths.push(path.to_path_buf());
                    }
                }
                Err(e) => warn!("Error walking {}: {}", folder.display(), e),
            }
        }
        paths.sort();
        paths
    }
}
