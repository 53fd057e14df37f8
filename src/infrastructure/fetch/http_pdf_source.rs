use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use crate::application::ports::{PdfSource, PdfSourceError};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HttpPdfSource {
    client: reqwest::Client,
}

impl HttpPdfSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpPdfSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PdfSource for HttpPdfSource {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes, PdfSourceError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| PdfSourceError::RequestFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PdfSourceError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut stream = response.bytes_stream();
        let mut buf = BytesMut::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| PdfSourceError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            buf.extend_from_slice(&chunk);
        }

        tracing::debug!(bytes = buf.len(), "Download complete");

        Ok(buf.freeze())
    }
}
