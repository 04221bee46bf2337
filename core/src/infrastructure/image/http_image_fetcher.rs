use std::time::Duration;

use reqwest::{Client, header::CONTENT_TYPE};
use tracing::instrument;

use crate::domain::{
    assessment::{entities::InlineImage, ports::ImageFetcher},
    common::entities::app_errors::CoreError,
    storage::value_objects::MAX_IMAGE_BYTES,
};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CoreError::ExternalServiceError(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: MAX_IMAGE_BYTES,
        })
    }
}

fn too_large(max_bytes: usize) -> CoreError {
    CoreError::ExternalServiceError(format!("Image exceeds {max_bytes} bytes"))
}

/// Media type without parameters, e.g. `image/png; charset=binary` gives `image/png`.
fn mime_essence(content_type: Option<&str>) -> String {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string())
}

impl ImageFetcher for HttpImageFetcher {
    #[instrument(skip(self))]
    async fn fetch_image(&self, url: &str) -> Result<InlineImage, CoreError> {
        let mut response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Image request failed");
            CoreError::ExternalServiceError(format!("Failed to fetch image: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "Failed to fetch image: HTTP {}",
                response.status()
            )));
        }

        let mime_type = mime_essence(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        if response
            .content_length()
            .is_some_and(|length| length > self.max_bytes as u64)
        {
            tracing::warn!(content_length = ?response.content_length(), "Image too large");
            return Err(too_large(self.max_bytes));
        }

        // Content-Length may be absent or wrong; count while reading.
        let mut data = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("Failed to read image body: {}", e))
        })? {
            if data.len() + chunk.len() > self.max_bytes {
                tracing::warn!(read = data.len(), "Image body exceeded limit");
                return Err(too_large(self.max_bytes));
            }
            data.extend_from_slice(&chunk);
        }

        Ok(InlineImage { mime_type, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    /// Serves one response with `body_len` bytes of PNG-typed data.
    fn serve_once(body_len: usize, send_length: bool) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);

            let mut head = String::from("HTTP/1.1 200 OK\r\nContent-Type: image/png\r\n");
            if send_length {
                head.push_str(&format!("Content-Length: {body_len}\r\n"));
            }
            head.push_str("Connection: close\r\n\r\n");
            let _ = stream.write_all(head.as_bytes());

            let chunk = [0u8; 4096];
            let mut written = 0;
            while written < body_len {
                let n = chunk.len().min(body_len - written);
                if stream.write_all(&chunk[..n]).is_err() {
                    return;
                }
                written += n;
            }
        });

        format!("http://{addr}/tongue.png")
    }

    fn fetcher(max_bytes: usize) -> HttpImageFetcher {
        HttpImageFetcher {
            max_bytes,
            ..HttpImageFetcher::new().unwrap()
        }
    }

    #[tokio::test]
    async fn fetches_image_within_limit() {
        let url = serve_once(2048, true);
        let image = fetcher(4096).fetch_image(&url).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data.len(), 2048);
    }

    #[tokio::test]
    async fn rejects_declared_length_over_limit() {
        let url = serve_once(64 * 1024, true);
        let result = fetcher(4096).fetch_image(&url).await;
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn stops_reading_undeclared_body_over_limit() {
        let url = serve_once(64 * 1024, false);
        let result = fetcher(4096).fetch_image(&url).await;
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[test]
    fn default_limit_matches_upload_cap() {
        assert_eq!(HttpImageFetcher::new().unwrap().max_bytes, MAX_IMAGE_BYTES);
    }

    #[test]
    fn mime_defaults_to_jpeg() {
        assert_eq!(mime_essence(None), "image/jpeg");
        assert_eq!(mime_essence(Some("")), "image/jpeg");
    }

    #[test]
    fn mime_drops_parameters() {
        assert_eq!(mime_essence(Some("Image/PNG; charset=binary")), "image/png");
    }
}
