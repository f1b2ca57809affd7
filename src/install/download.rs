//! Archive fetch over HTTP(S).
//!
//! Failures here are recoverable from the caller's point of view: the
//! error carries the source URL so a manual browser download can be
//! offered instead of an automatic retry.

use crate::error::{JdkmanError, Result};
use attohttpc::Session;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Download `url` to `dest`, returning the number of bytes written.
pub fn download_archive(url: &str, dest: &Path) -> Result<u64> {
    log::info!("Downloading {url}");

    let mut session = Session::new();
    session.proxy_settings(attohttpc::ProxySettings::from_env());

    let response = session
        .get(url)
        .timeout(DOWNLOAD_TIMEOUT)
        .follow_redirects(true)
        .send()
        .map_err(|e| JdkmanError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.is_success() {
        return Err(JdkmanError::Download {
            url: url.to_string(),
            reason: format!("HTTP status {}", response.status()),
        });
    }

    let file = File::create(dest)?;
    let bytes = response.write_to(file).map_err(|e| JdkmanError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    log::debug!("Downloaded {bytes} bytes to {}", dest.display());
    Ok(bytes)
}
