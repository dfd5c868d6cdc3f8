use super::ImageFieldScheme;
use crate::form::{DocumentKind, FormState, SelectedFile};
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPart {
    Text { key: String, value: String },
    File { key: String, file: SelectedFile },
}

impl PayloadPart {
    pub fn key(&self) -> &str {
        match self {
            PayloadPart::Text { key, .. } | PayloadPart::File { key, .. } => key,
        }
    }
}

/// Snapshot of the form in wire order, detached from UI state so it can
/// cross to the upload thread.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionPayload {
    pub parts: Vec<PayloadPart>,
}

impl SubmissionPayload {
    pub fn build(form: &FormState, scheme: &ImageFieldScheme) -> Self {
        let mut parts = vec![
            PayloadPart::Text {
                key: "name".to_string(),
                value: form.name().trim().to_string(),
            },
            PayloadPart::Text {
                key: "email".to_string(),
                value: form.email().trim().to_string(),
            },
        ];

        for kind in DocumentKind::ALL {
            if let Some(file) = form.document(kind) {
                parts.push(PayloadPart::File {
                    key: kind.field_key().to_string(),
                    file: file.clone(),
                });
            }
        }

        for (index, file) in form.images().iter().enumerate() {
            parts.push(PayloadPart::File {
                key: scheme.field_key(index),
                file: file.clone(),
            });
        }

        Self { parts }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.parts.iter().map(PayloadPart::key).collect()
    }

    pub fn into_form(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                PayloadPart::Text { key, value } => form.text(key, value),
                PayloadPart::File { key, file } => {
                    let part = Part::bytes(file.bytes.to_vec())
                        .file_name(file.name)
                        .mime_str(file.mime)?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        let mut form = FormState::default();
        form.set_name(" Siti ");
        form.set_email("siti@example.com");
        form.set_document(
            DocumentKind::PdrmReport,
            SelectedFile::from_bytes("pdrm.pdf", "application/pdf", vec![1]),
        )
        .unwrap();
        form.set_document(
            DocumentKind::ClaimForm,
            SelectedFile::from_bytes("claim.jpg", "image/jpeg", vec![2]),
        )
        .unwrap();
        form.add_images([
            SelectedFile::from_bytes("a.png", "image/png", vec![3]),
            SelectedFile::from_bytes("b.png", "image/png", vec![4]),
        ]);
        form
    }

    #[test]
    fn repeated_scheme_reuses_the_image_key() {
        let payload = SubmissionPayload::build(&form(), &ImageFieldScheme::default());
        assert_eq!(
            payload.keys().join(","),
            "name,email,claim_form,pdrm_report,images,images"
        );
        assert_eq!(
            payload.parts[0],
            PayloadPart::Text {
                key: "name".into(),
                value: "Siti".into()
            }
        );
    }

    #[test]
    fn indexed_scheme_numbers_each_image() {
        let scheme = ImageFieldScheme::Indexed {
            prefix: "supporting_photo_".into(),
        };
        let payload = SubmissionPayload::build(&form(), &scheme);
        assert_eq!(
            payload.keys().join(","),
            "name,email,claim_form,pdrm_report,supporting_photo_1,supporting_photo_2"
        );
    }

    #[test]
    fn converts_into_a_multipart_form() {
        let payload = SubmissionPayload::build(&form(), &ImageFieldScheme::default());
        let form = payload.into_form().unwrap();
        assert!(!form.boundary().is_empty());
    }
}
