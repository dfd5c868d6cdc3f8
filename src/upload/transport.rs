use super::SubmissionPayload;
use crate::error::SubmitError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(&self, url: &str, payload: SubmissionPayload) -> Result<(), SubmitError>;
}

#[derive(Deserialize)]
struct WebhookReply {
    message: Option<String>,
}

pub fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<WebhookReply>(body)
        .ok()
        .and_then(|reply| reply.message)
        .filter(|message| !message.trim().is_empty())
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post(&self, url: &str, payload: SubmissionPayload) -> Result<(), SubmitError> {
        let keys = payload.keys().join(", ");
        info!("Posting claim to {} with fields [{}]", url, keys);

        let form = payload.into_form()?;
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();

        if status.is_success() {
            info!("Webhook accepted claim with status {}", status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body);
        error!(
            "Webhook rejected claim with status {}: {}",
            status,
            message.as_deref().unwrap_or("<no message>")
        );
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormState, SelectedFile};
    use crate::upload::ImageFieldScheme;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers one request on a loopback port and hands back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/webhook/claim", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        (url, handle)
    }

    fn read_request(stream: &mut impl Read) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let headers = text[..header_end].to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let chunked = headers.contains("transfer-encoding: chunked");
            let done = match content_length {
                Some(len) => buf.len() >= header_end + 4 + len,
                None => !chunked || text.ends_with("0\r\n\r\n"),
            };
            if done {
                break;
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn payload() -> SubmissionPayload {
        let mut form = FormState::default();
        form.set_name("Nurul");
        form.set_email("nurul@example.com");
        let photo = SelectedFile::from_bytes("x.png", "image/png", vec![7, 7, 7]);
        form.add_images([photo]);
        SubmissionPayload::build(&form, &ImageFieldScheme::default())
    }

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn rejected_upload_surfaces_the_server_message() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"message":"disk full"}"#);

        let err = transport().post(&url, payload()).await.unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, SubmitError::Rejected { status: 500, .. }));
        assert_eq!(err.user_message(), "disk full");
    }

    #[tokio::test]
    async fn no_content_counts_as_success() {
        let (url, server) = serve_once("204 No Content", "");

        transport().post(&url, payload()).await.unwrap();
        server.join().unwrap();
    }

    #[tokio::test]
    async fn request_is_multipart_with_named_parts() {
        let (url, server) = serve_once("200 OK", "{}");

        transport().post(&url, payload()).await.unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /webhook/claim "));
        assert!(request
            .to_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains(r#"name="name""#));
        assert!(request.contains("Nurul"));
        assert!(request.contains(r#"name="email""#));
        assert!(request.contains(r#"name="images"; filename="x.png""#));
        assert!(request.contains("image/png"));
    }

    #[test]
    fn extracts_message_from_json_body() {
        assert_eq!(
            server_message(r#"{"message":"disk full"}"#).as_deref(),
            Some("disk full")
        );
    }

    #[test]
    fn ignores_bodies_without_a_message() {
        assert_eq!(server_message(""), None);
        assert_eq!(server_message("<html>Bad Gateway</html>"), None);
        assert_eq!(server_message(r#"{"code":500}"#), None);
        assert_eq!(server_message(r#"{"message":""}"#), None);
    }
}
