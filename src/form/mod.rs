mod file;
pub mod preview;
mod validation;

use crate::error::FormError;
use crate::utils::mime::MimeUtils;
use std::collections::HashMap;
use tracing::debug;

pub use file::{FileId, SelectedFile};
pub use validation::{validate, MissingField, ValidationPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    ClaimForm,
    PdrmReport,
    WorkshopReport,
    DrivingLicense,
    IdentityCard,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::ClaimForm,
        DocumentKind::PdrmReport,
        DocumentKind::WorkshopReport,
        DocumentKind::DrivingLicense,
        DocumentKind::IdentityCard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::ClaimForm => "Claim Form",
            DocumentKind::PdrmReport => "PDRM Report",
            DocumentKind::WorkshopReport => "Workshop Report",
            DocumentKind::DrivingLicense => "Driving License",
            DocumentKind::IdentityCard => "Identity Card",
        }
    }

    /// Multipart field name for this slot.
    pub fn field_key(&self) -> &'static str {
        match self {
            DocumentKind::ClaimForm => "claim_form",
            DocumentKind::PdrmReport => "pdrm_report",
            DocumentKind::WorkshopReport => "workshop_report",
            DocumentKind::DrivingLicense => "driving_license",
            DocumentKind::IdentityCard => "identity_card",
        }
    }

    pub fn from_field_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field_key() == key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    name: String,
    email: String,
    documents: HashMap<DocumentKind, SelectedFile>,
    images: Vec<SelectedFile>,
}

impl FormState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn document(&self, kind: DocumentKind) -> Option<&SelectedFile> {
        self.documents.get(&kind)
    }

    /// Puts `file` into the slot, returning whatever it replaced.
    pub fn set_document(
        &mut self,
        kind: DocumentKind,
        file: SelectedFile,
    ) -> Result<Option<SelectedFile>, FormError> {
        if !MimeUtils::is_document(file.mime) {
            return Err(FormError::UnsupportedDocument { name: file.name });
        }
        Ok(self.documents.insert(kind, file))
    }

    pub fn clear_document(&mut self, kind: DocumentKind) -> Option<SelectedFile> {
        self.documents.remove(&kind)
    }

    pub fn images(&self) -> &[SelectedFile] {
        &self.images
    }

    /// Appends the image files from `files`; anything else is dropped.
    pub fn add_images(&mut self, files: impl IntoIterator<Item = SelectedFile>) -> usize {
        let before = self.images.len();
        for file in files {
            if file.is_image() {
                self.images.push(file);
            } else {
                debug!("Discarding non-image pick '{}' ({})", file.name, file.mime);
            }
        }
        self.images.len() - before
    }

    pub fn remove_image(&mut self, index: usize) -> Option<SelectedFile> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    /// Present documents in slot order, followed by the images.
    pub fn files(&self) -> impl Iterator<Item = &SelectedFile> {
        DocumentKind::ALL
            .iter()
            .filter_map(|kind| self.documents.get(kind))
            .chain(self.images.iter())
    }

    pub fn find(&self, id: FileId) -> Option<&SelectedFile> {
        self.files().find(|file| file.id == id)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.documents.is_empty()
            && self.images.is_empty()
    }

    pub fn clear(&mut self) {
        *self = FormState::default();
    }
}
