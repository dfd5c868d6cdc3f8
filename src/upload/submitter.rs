use super::{ImageFieldScheme, SubmissionPayload, UploadStatus, WebhookTransport};
use crate::error::{SubmitError, FALLBACK_FAILURE_MESSAGE};
use crate::form::{validate, FormState, ValidationPolicy};
use derivative::Derivative;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tracing::{error, info, warn};

type Outcome = Result<(), SubmitError>;

/// Owns the upload status and the single request that may be in flight.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Submitter {
    status: UploadStatus,
    policy: ValidationPolicy,
    image_fields: ImageFieldScheme,
    #[derivative(Debug = "ignore")]
    transport: Arc<dyn WebhookTransport>,
    #[derivative(Debug = "ignore")]
    outcome_receiver: Option<Receiver<Outcome>>,
}

impl Submitter {
    pub fn new(
        transport: Arc<dyn WebhookTransport>,
        policy: ValidationPolicy,
        image_fields: ImageFieldScheme,
    ) -> Self {
        Self {
            status: UploadStatus::Idle,
            policy,
            image_fields,
            transport,
            outcome_receiver: None,
        }
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Starts an upload of `form` to `url`. Returns whether a request was sent.
    pub fn submit(&mut self, form: &FormState, url: &str) -> bool {
        if self.status.is_uploading() {
            warn!("Ignoring submit while an upload is in flight");
            return false;
        }

        if let Err(missing) = validate(form, &self.policy) {
            info!("Submission blocked: {}", missing);
            self.status = UploadStatus::MissingField(missing);
            return false;
        }

        let payload = SubmissionPayload::build(form, &self.image_fields);
        let transport = Arc::clone(&self.transport);
        let url = url.to_string();
        let (sender, receiver) = mpsc::channel();
        self.outcome_receiver = Some(receiver);
        self.status = UploadStatus::Uploading;

        info!(
            "Submitting claim for '{}' with {} parts to {}",
            form.name().trim(),
            payload.parts.len(),
            url
        );

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(async { transport.post(&url, payload).await }),
                Err(e) => Err(SubmitError::Runtime(e)),
            };
            let _ = sender.send(outcome);
        });

        true
    }

    /// Applies a finished upload, if any. Success empties `form`; failure
    /// leaves it untouched for a retry. Returns whether an outcome was applied.
    pub fn poll(&mut self, form: &mut FormState) -> bool {
        let Some(receiver) = &self.outcome_receiver else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                error!("Upload worker exited without reporting a result");
                self.outcome_receiver = None;
                self.status = UploadStatus::Failure(FALLBACK_FAILURE_MESSAGE.to_string());
                return true;
            }
        };

        self.outcome_receiver = None;
        match outcome {
            Ok(()) => {
                info!("Claim submitted");
                form.clear();
                self.status = UploadStatus::Success;
            }
            Err(e) => {
                error!("Claim submission failed: {}", e);
                self.status = UploadStatus::Failure(e.user_message());
            }
        }
        true
    }
}
