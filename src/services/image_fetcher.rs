//! Getting the raw bytes of one board image.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{FetchConfig, ImageReference};

/// Something that can produce the encoded bytes of an image reference.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, image: &ImageReference) -> Result<Vec<u8>, FetchError>;
}

/// HTTP(S) image download with a timeout, a content-type check and a byte
/// ceiling enforced both on `Content-Length` and while streaming.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config.max_bytes))
    }

    pub fn with_client(client: reqwest::Client, max_bytes: u64) -> Self {
        Self { client, max_bytes }
    }
}

#[async_trait]
impl ImageSource for HttpImageFetcher {
    async fn fetch(&self, image: &ImageReference) -> Result<Vec<u8>, FetchError> {
        if !image.url.starts_with("http://") && !image.url.starts_with("https://") {
            return Err(FetchError::Unsupported(image.url.clone()));
        }

        let mut response = self
            .client
            .get(&image.url)
            .header(
                reqwest::header::ACCEPT,
                "image/webp,image/apng,image/*,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(FetchError::NotAnImage(content_type));
        }

        if let Some(size) = response.content_length() {
            if size > self.max_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    max: self.max_bytes,
                });
            }
        }

        // Content-Length can be absent or wrong; enforce the ceiling on
        // the bytes actually received
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let size = (bytes.len() + chunk.len()) as u64;
            if size > self.max_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    max: self.max_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(
            index = image.index,
            url = %image.url,
            bytes = bytes.len(),
            content_type = %content_type,
            "Fetched image"
        );
        Ok(bytes)
    }
}

/// Routes `synthetic://` references to one source and everything else to
/// another.
pub struct SchemeRouter {
    synthetic: Arc<dyn ImageSource>,
    network: Arc<dyn ImageSource>,
}

impl SchemeRouter {
    pub fn new(synthetic: Arc<dyn ImageSource>, network: Arc<dyn ImageSource>) -> Self {
        Self { synthetic, network }
    }
}

#[async_trait]
impl ImageSource for SchemeRouter {
    async fn fetch(&self, image: &ImageReference) -> Result<Vec<u8>, FetchError> {
        if image.url.starts_with(super::fallback::SYNTHETIC_SCHEME) {
            self.synthetic.fetch(image).await
        } else {
            self.network.fetch(image).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static [u8]);

    #[async_trait]
    impl ImageSource for Fixed {
        async fn fetch(&self, _image: &ImageReference) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.to_vec())
        }
    }

    #[tokio::test]
    async fn test_rejects_non_http_reference() {
        let fetcher = HttpImageFetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher
            .fetch(&ImageReference::new(0, "file:///etc/passwd"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unsupported(_)));
    }

    /// Serve one chunked `image/png` response without Content-Length and
    /// return its URL.
    async fn serve_chunked(chunks: usize, chunk_size: usize) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let mut response = b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\n\
                Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n"
                .to_vec();
            for _ in 0..chunks {
                response.extend_from_slice(format!("{chunk_size:x}\r\n").as_bytes());
                response.extend(std::iter::repeat(0xAB).take(chunk_size));
                response.extend_from_slice(b"\r\n");
            }
            response.extend_from_slice(b"0\r\n\r\n");

            // The client may hang up early once it has seen enough
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/chunked.png")
    }

    #[tokio::test]
    async fn test_ceiling_enforced_without_content_length() {
        let url = serve_chunked(4, 1024).await;
        let fetcher = HttpImageFetcher::with_client(reqwest::Client::new(), 2000);

        let err = fetcher
            .fetch(&ImageReference::new(0, url))
            .await
            .unwrap_err();

        match err {
            FetchError::TooLarge { size, max } => {
                assert_eq!(max, 2000);
                assert!(size > 2000, "size {size}");
            }
            other => panic!("expected TooLarge, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_chunked_body_under_ceiling() {
        let url = serve_chunked(3, 512).await;
        let fetcher = HttpImageFetcher::with_client(reqwest::Client::new(), 2000);

        let bytes = fetcher.fetch(&ImageReference::new(0, url)).await.unwrap();
        assert_eq!(bytes.len(), 3 * 512);
        assert!(bytes.iter().all(|b| *b == 0xAB));
    }

    #[tokio::test]
    async fn test_router_dispatches_on_scheme() {
        let router = SchemeRouter::new(Arc::new(Fixed(b"synthetic")), Arc::new(Fixed(b"network")));

        let synthetic = router
            .fetch(&ImageReference::new(0, "synthetic://fallback/0"))
            .await
            .unwrap();
        let network = router
            .fetch(&ImageReference::new(1, "https://example.com/a.jpg"))
            .await
            .unwrap();

        assert_eq!(synthetic, b"synthetic");
        assert_eq!(network, b"network");
    }
}
