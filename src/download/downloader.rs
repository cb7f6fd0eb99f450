//! Pre-signed URL downloader

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Streams report files to disk
#[derive(Debug)]
pub struct Downloader {
    http: HttpClient,
    timeout: Duration,
}

impl Downloader {
    /// Create a downloader with the given timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let config = HttpClientConfig::builder().timeout(timeout).build();
        Ok(Self {
            http: HttpClient::with_config(config)?,
            timeout,
        })
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// The body is streamed into `<dest>.part` and renamed once complete, so
    /// `dest` only appears when the whole body arrived. Every failure,
    /// including a non-2xx status, is reported as `Error::Download`.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.fetch(url, dest).await.map_err(|e| match e {
            Error::Download { .. } => e,
            other => Error::download(other.to_string()),
        })
    }

    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        debug!(dest = %dest.display(), "Starting download");

        let response = self.http.get(url, Some(self.timeout)).await?;

        let partial = partial_path(dest);
        let written = match write_stream(response, &partial).await {
            Ok(n) => n,
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        fs::rename(&partial, dest).await?;
        info!(dest = %dest.display(), bytes = written, "Download complete");
        Ok(written)
    }
}

async fn write_stream(response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::download(e.to_string()))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
