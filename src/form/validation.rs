use super::{DocumentKind, FormState};
use std::fmt;

/// Which fields a submission must carry beyond name and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub required_documents: Vec<DocumentKind>,
    pub require_images: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            required_documents: Vec::new(),
            require_images: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Email,
    Document(DocumentKind),
    Images,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Name => write!(f, "Please enter your name."),
            MissingField::Email => write!(f, "Please enter your email."),
            MissingField::Document(kind) => write!(f, "Please upload the {}.", kind.label()),
            MissingField::Images => write!(f, "Please add at least one supporting photo."),
        }
    }
}

/// First failing check wins: name, email, required documents in slot order, images.
pub fn validate(form: &FormState, policy: &ValidationPolicy) -> Result<(), MissingField> {
    if form.name().trim().is_empty() {
        return Err(MissingField::Name);
    }
    if form.email().trim().is_empty() {
        return Err(MissingField::Email);
    }

    if let Some(kind) = DocumentKind::ALL
        .into_iter()
        .filter(|kind| policy.required_documents.contains(kind))
        .find(|kind| form.document(*kind).is_none())
    {
        return Err(MissingField::Document(kind));
    }

    if policy.require_images && form.images().is_empty() {
        return Err(MissingField::Images);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SelectedFile;

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, "application/pdf", vec![1, 2, 3])
    }

    fn complete_form() -> FormState {
        let mut form = FormState::default();
        form.set_name("Lim Wei");
        form.set_email("lim@example.com");
        form.set_document(DocumentKind::ClaimForm, pdf("claim.pdf"))
            .unwrap();
        form.set_document(DocumentKind::PdrmReport, pdf("pdrm.pdf"))
            .unwrap();
        form.add_images([SelectedFile::from_bytes("a.png", "image/png", vec![9])]);
        form
    }

    fn strict() -> ValidationPolicy {
        ValidationPolicy {
            required_documents: vec![DocumentKind::PdrmReport, DocumentKind::ClaimForm],
            require_images: true,
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(validate(&complete_form(), &strict()), Ok(()));
    }

    #[test]
    fn checks_short_circuit_in_order() {
        let mut form = FormState::default();
        assert_eq!(validate(&form, &strict()), Err(MissingField::Name));

        form.set_name("   ");
        assert_eq!(validate(&form, &strict()), Err(MissingField::Name));

        form.set_name("Lim Wei");
        assert_eq!(validate(&form, &strict()), Err(MissingField::Email));

        form.set_email("lim@example.com");
        assert_eq!(
            validate(&form, &strict()),
            Err(MissingField::Document(DocumentKind::ClaimForm))
        );

        form.set_document(DocumentKind::ClaimForm, pdf("claim.pdf"))
            .unwrap();
        assert_eq!(
            validate(&form, &strict()),
            Err(MissingField::Document(DocumentKind::PdrmReport))
        );

        form.set_document(DocumentKind::PdrmReport, pdf("pdrm.pdf"))
            .unwrap();
        assert_eq!(validate(&form, &strict()), Err(MissingField::Images));
    }

    #[test]
    fn default_policy_leaves_documents_optional() {
        let mut form = complete_form();
        form.clear_document(DocumentKind::ClaimForm);
        form.clear_document(DocumentKind::PdrmReport);
        assert_eq!(validate(&form, &ValidationPolicy::default()), Ok(()));

        form.remove_image(0);
        assert_eq!(
            validate(&form, &ValidationPolicy::default()),
            Err(MissingField::Images)
        );
    }

    #[test]
    fn reasons_read_as_instructions() {
        assert_eq!(MissingField::Name.to_string(), "Please enter your name.");
        assert_eq!(
            MissingField::Document(DocumentKind::PdrmReport).to_string(),
            "Please upload the PDRM Report."
        );
    }
}
