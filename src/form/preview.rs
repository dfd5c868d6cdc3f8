use super::{FileId, SelectedFile};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Whoever caches the decoded image behind a preview URI.
pub trait PreviewSink {
    fn release(&self, uri: &str);
}

impl PreviewSink for eframe::egui::Context {
    fn release(&self, uri: &str) {
        self.forget_image(uri);
    }
}

#[derive(Debug, Clone)]
pub struct PreviewEntry {
    pub uri: String,
    pub bytes: Arc<[u8]>,
}

/// Session-local preview URIs for the image files currently in the form.
///
/// `sync` is cheap to call every frame: it only acquires URIs for files it has
/// not seen and releases the URIs of files that left the form. Each URI is
/// released exactly once, at the latest when the registry is dropped.
pub struct PreviewRegistry<S: PreviewSink> {
    sink: S,
    entries: HashMap<FileId, PreviewEntry>,
}

impl<S: PreviewSink> PreviewRegistry<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            entries: HashMap::new(),
        }
    }

    pub fn sync<'a>(&mut self, files: impl IntoIterator<Item = &'a SelectedFile>) {
        let mut live = HashSet::new();

        for file in files.into_iter().filter(|f| f.is_image()) {
            live.insert(file.id);
            self.entries.entry(file.id).or_insert_with(|| {
                let uri = format!("bytes://preview/{}/{}", file.id, file.name);
                debug!("Acquired preview {}", uri);
                PreviewEntry {
                    uri,
                    bytes: file.bytes.clone(),
                }
            });
        }

        let stale: Vec<FileId> = self
            .entries
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        for id in stale {
            self.release(id);
        }
    }

    pub fn get(&self, id: FileId) -> Option<&PreviewEntry> {
        self.entries.get(&id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn release_all(&mut self) {
        let ids: Vec<FileId> = self.entries.keys().copied().collect();
        for id in ids {
            self.release(id);
        }
    }

    fn release(&mut self, id: FileId) {
        if let Some(entry) = self.entries.remove(&id) {
            debug!("Released preview {}", entry.uri);
            self.sink.release(&entry.uri);
        }
    }
}

impl<S: PreviewSink> Drop for PreviewRegistry<S> {
    fn drop(&mut self) {
        self.release_all();
    }
}
