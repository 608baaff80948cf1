use std::path::Path;

use reqwest::{Client, StatusCode};

use crate::error::{ZapError, ZapResult};

/// Downloads the playlist at `url` and writes the body verbatim to `path`.
///
/// Only a plain `200 OK` counts as success; any other status is returned as
/// an error without retrying. The destination file is created or truncated.
/// A failed fetch may leave a truncated file behind, callers treat the error
/// as fatal either way.
pub async fn fetch_and_store(client: &Client, url: &str, path: impl AsRef<Path>) -> ZapResult<()> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        if let Ok(body) = response.text().await {
            tracing::warn!("Error body: {body}");
        }
        return Err(ZapError::HttpError(status));
    }

    let body = response.bytes().await?;
    tokio::fs::write(path.as_ref(), &body).await?;
    tracing::info!("playlist stored at {}", path.as_ref().display());

    Ok(())
}
