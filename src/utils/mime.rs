use std::path::Path;

pub const PDF: &str = "application/pdf";
pub const OCTET_STREAM: &str = "application/octet-stream";

const KNOWN_TYPES: [(&str, &str); 9] = [
    ("pdf", PDF),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];
pub const DOCUMENT_EXTENSIONS: [&str; 9] = [
    "pdf", "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff",
];

pub struct MimeUtils;

impl MimeUtils {
    pub fn from_path(path: &Path) -> &'static str {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| {
                KNOWN_TYPES
                    .iter()
                    .find(|(known, _)| *known == ext)
                    .map(|(_, mime)| *mime)
            })
            .unwrap_or(OCTET_STREAM)
    }

    pub fn is_image(mime: &str) -> bool {
        mime.starts_with("image/")
    }

    pub fn is_document(mime: &str) -> bool {
        mime == PDF || Self::is_image(mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(MimeUtils::from_path(Path::new("scan.JPG")), "image/jpeg");
        assert_eq!(MimeUtils::from_path(Path::new("report.pdf")), PDF);
        assert_eq!(MimeUtils::from_path(Path::new("notes")), OCTET_STREAM);
        assert_eq!(MimeUtils::from_path(Path::new("notes.docx")), OCTET_STREAM);
    }

    #[test]
    fn documents_accept_pdf_and_images_only() {
        assert!(MimeUtils::is_document(PDF));
        assert!(MimeUtils::is_document("image/png"));
        assert!(!MimeUtils::is_document(OCTET_STREAM));
        assert!(!MimeUtils::is_image(PDF));
    }
}
