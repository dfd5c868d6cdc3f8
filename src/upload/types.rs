use crate::form::MissingField;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    MissingField(MissingField),
    Uploading,
    Success,
    Failure(String),
}

impl UploadStatus {
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadStatus::Uploading)
    }

    pub fn status_text(&self) -> String {
        match self {
            UploadStatus::Idle => String::new(),
            UploadStatus::MissingField(reason) => format!("⚠️ {}", reason),
            UploadStatus::Uploading => "⏳ Uploading...".to_string(),
            UploadStatus::Success => "✅ Upload successful!".to_string(),
            UploadStatus::Failure(message) => format!("❌ Upload failed: {}", message),
        }
    }
}

/// How the image list is keyed in the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageFieldScheme {
    /// Every image under the same key.
    Repeated { key: String },
    /// `<prefix>1`, `<prefix>2`, ...
    Indexed { prefix: String },
}

impl ImageFieldScheme {
    pub const DEFAULT_REPEATED_KEY: &'static str = "images";
    pub const DEFAULT_INDEXED_PREFIX: &'static str = "supporting_photo_";

    pub fn field_key(&self, index: usize) -> String {
        match self {
            ImageFieldScheme::Repeated { key } => key.clone(),
            ImageFieldScheme::Indexed { prefix } => format!("{}{}", prefix, index + 1),
        }
    }
}

impl Default for ImageFieldScheme {
    fn default() -> Self {
        ImageFieldScheme::Repeated {
            key: Self::DEFAULT_REPEATED_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::DocumentKind;

    #[test]
    fn status_text_matches_severity() {
        assert_eq!(UploadStatus::Idle.status_text(), "");
        assert_eq!(
            UploadStatus::MissingField(MissingField::Document(DocumentKind::ClaimForm))
                .status_text(),
            "⚠️ Please upload the Claim Form."
        );
        assert_eq!(
            UploadStatus::Failure("disk full".into()).status_text(),
            "❌ Upload failed: disk full"
        );
    }

    #[test]
    fn indexed_keys_start_at_one() {
        let scheme = ImageFieldScheme::Indexed {
            prefix: "supporting_photo_".into(),
        };
        assert_eq!(scheme.field_key(0), "supporting_photo_1");
        assert_eq!(scheme.field_key(4), "supporting_photo_5");
        assert_eq!(ImageFieldScheme::default().field_key(7), "images");
    }
}
