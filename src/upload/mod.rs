mod payload;
mod submitter;
mod transport;
mod types;

pub use payload::SubmissionPayload;
pub use submitter::Submitter;
pub use transport::{ReqwestTransport, WebhookTransport};
pub use types::{ImageFieldScheme, UploadStatus};
