//! Single-shot HTTP transfer to a local file.

use super::download::Download;
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::ProgressBarOpts;

use futures::StreamExt;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::Path;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

/// Fetches remote files in a single attempt.
#[derive(Clone)]
pub struct Fetcher {
    client: ClientWithMiddleware,
    progress: ProgressBarOpts,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    pub fn new(client: ClientWithMiddleware, progress: ProgressBarOpts) -> Self {
        Self { client, progress }
    }

    /// Builds the HTTP client from `config`.
    pub fn from_config(config: HttpClientConfig, progress: ProgressBarOpts) -> Result<Self> {
        Ok(Self::new(create_http_client(config)?, progress))
    }

    /// Downloads `download` into `output`, creating or truncating the file.
    ///
    /// Returns the number of bytes written. A connection or body-stream error
    /// is reported as [`Error::Transport`], a non-success status as
    /// [`Error::Status`].
    pub async fn fetch(&self, download: &Download, output: &Path) -> Result<u64> {
        let url = download.url.to_string();

        debug!("Fetching {}", url);
        let res = self
            .client
            .get(download.url.clone())
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        let pb = self
            .progress
            .clone()
            .to_progress_bar(res.content_length().unwrap_or(0));
        pb.set_message(download.filename.clone());

        debug!("Creating destination file {:?}", output);
        let mut file = File::create(output)
            .await
            .map_err(|e| Error::io(output, e))?;

        let mut written: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item.map_err(|e| Error::Transport {
                url: url.clone(),
                source: e.into(),
            })?;
            let chunk_size = chunk.len() as u64;
            written += chunk_size;
            pb.inc(chunk_size);

            file.write_all_buf(&mut chunk)
                .await
                .map_err(|e| Error::io(output, e))?;
        }
        file.flush().await.map_err(|e| Error::io(output, e))?;

        if self.progress.clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }

        debug!("Fetched {} bytes from {}", written, url);
        Ok(written)
    }
}
