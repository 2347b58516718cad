//! HTTP file store adapter.
//!
//! Talks to the backend's file endpoints:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET {base}/files/list` → `{ "filenames": [..] }` |
//! | upload | `POST {base}/files/create`, multipart field `file` |
//! | delete | `DELETE {base}/files/delete?filename=<name>` |

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use streamchat_application::ports::file_store::{FileAck, FileStoreError, FileStorePort};
use tracing::{debug, trace};

/// Request timeout for file operations.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("streamchat/", env!("CARGO_PKG_VERSION"));

/// [`FileStorePort`] backed by reqwest.
pub struct HttpFileStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFileStore {
    /// `base_url` is the backend's HTTP root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FileStoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FileStoreError::Request(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status and parse the body as JSON (an empty body is `null`).
    async fn read_json(response: reqwest::Response) -> Result<Value, FileStoreError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FileStoreError::Request(e.to_string()))?;
        trace!("File endpoint replied {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(FileStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| FileStoreError::InvalidResponse(e.to_string()))
    }
}

fn request_error(e: reqwest::Error) -> FileStoreError {
    FileStoreError::Request(e.to_string())
}

#[async_trait]
impl FileStorePort for HttpFileStore {
    async fn list(&self) -> Result<Vec<String>, FileStoreError> {
        let response = self
            .client
            .get(self.url("/files/list"))
            .send()
            .await
            .map_err(request_error)?;
        let body = Self::read_json(response).await?;

        let Some(filenames) = body.get("filenames") else {
            debug!("List response has no `filenames` field");
            return Ok(Vec::new());
        };
        let names = filenames.as_array().ok_or_else(|| {
            FileStoreError::InvalidResponse("`filenames` is not an array".to_string())
        })?;

        names
            .iter()
            .map(|name| {
                name.as_str().map(str::to_string).ok_or_else(|| {
                    FileStoreError::InvalidResponse(format!("non-string filename: {}", name))
                })
            })
            .collect()
    }

    async fn upload(&self, path: &Path) -> Result<FileAck, FileStoreError> {
        let io_error = |message: String| FileStoreError::Io {
            path: path.display().to_string(),
            message,
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| io_error("not a file path".to_string()))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| io_error(e.to_string()))?;
        debug!("Uploading {} ({} bytes)", filename, bytes.len());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename));
        let response = self
            .client
            .post(self.url("/files/create"))
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        Ok(FileAck::new(Self::read_json(response).await?))
    }

    async fn delete(&self, filename: &str) -> Result<FileAck, FileStoreError> {
        if filename.is_empty() {
            return Err(FileStoreError::EmptyFilename);
        }
        let response = self
            .client
            .delete(self.url("/files/delete"))
            .query(&[("filename", filename)])
            .send()
            .await
            .map_err(request_error)?;
        Ok(FileAck::new(Self::read_json(response).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// A request as seen by the canned server.
    struct Captured {
        head: String,
        body: String,
    }

    /// Serve one canned HTTP response per connection and report each request.
    async fn canned_server(
        responses: Vec<(u16, &'static str)>,
    ) -> (String, mpsc::UnboundedReceiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let captured = read_request(&mut stream).await;
                tx.send(captured).unwrap();

                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
        });

        (base, rx)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> Captured {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let head_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "connection closed before end of headers");
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let lower = head.to_ascii_lowercase();
        let content_length = lower
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok());

        match content_length {
            Some(len) => {
                while buf.len() < head_end + len {
                    let n = stream.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "connection closed before end of body");
                    buf.extend_from_slice(&chunk[..n]);
                }
            }
            None if lower.contains("transfer-encoding: chunked") => {
                while !buf.ends_with(b"0\r\n\r\n") {
                    let n = stream.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "connection closed before last chunk");
                    buf.extend_from_slice(&chunk[..n]);
                }
            }
            None => {}
        }

        Captured {
            head,
            body: String::from_utf8_lossy(&buf[head_end..]).to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_filenames() {
        let (base, mut requests) =
            canned_server(vec![(200, r#"{"filenames":["a.pdf","b.txt"]}"#)]).await;
        let store = HttpFileStore::new(base).unwrap();

        let files = store.list().await.unwrap();

        assert_eq!(files, vec!["a.pdf", "b.txt"]);
        let request = requests.recv().await.unwrap();
        assert!(request.head.starts_with("GET /files/list HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_list_without_filenames_is_empty() {
        let (base, _requests) = canned_server(vec![(200, "{}")]).await;
        let store = HttpFileStore::new(base).unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_filenames() {
        let (base, _requests) = canned_server(vec![(200, r#"{"filenames":"a.pdf"}"#)]).await;
        let store = HttpFileStore::new(base).unwrap();

        assert!(matches!(
            store.list().await,
            Err(FileStoreError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "knowledge").unwrap();

        let (base, mut requests) =
            canned_server(vec![(200, r#"{"message":"File uploaded"}"#)]).await;
        let store = HttpFileStore::new(base).unwrap();

        let ack = store.upload(&path).await.unwrap();

        assert_eq!(ack.summary(), "File uploaded");
        let request = requests.recv().await.unwrap();
        assert!(request.head.starts_with("POST /files/create HTTP/1.1"));
        assert!(
            request
                .head
                .to_ascii_lowercase()
                .contains("content-type: multipart/form-data")
        );
        assert!(request.body.contains(r#"name="file""#));
        assert!(request.body.contains(r#"filename="notes.txt""#));
        assert!(request.body.contains("knowledge"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let store = HttpFileStore::new("http://127.0.0.1:9").unwrap();
        let result = store.upload(Path::new("/definitely/not/here.pdf")).await;
        assert!(matches!(result, Err(FileStoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_delete_encodes_filename_query() {
        let (base, mut requests) =
            canned_server(vec![(200, r#"{"message":"File deleted"}"#)]).await;
        let store = HttpFileStore::new(format!("{}/", base)).unwrap();

        let ack = store.delete("my file.pdf").await.unwrap();

        assert_eq!(ack.summary(), "File deleted");
        let request = requests.recv().await.unwrap();
        assert!(
            request
                .head
                .starts_with("DELETE /files/delete?filename=my+file.pdf HTTP/1.1")
        );
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, _requests) = canned_server(vec![(404, r#"{"detail":"File not found"}"#)]).await;
        let store = HttpFileStore::new(base).unwrap();

        match store.delete("gone.pdf").await {
            Err(FileStoreError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("File not found"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let store = HttpFileStore::new(base).unwrap();
        assert!(matches!(
            store.list().await,
            Err(FileStoreError::Request(_))
        ));
    }
}
