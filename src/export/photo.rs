//! Subject photo acquisition for the PDF export.
//!
//! Profile images live in external blob storage and are fetched at export
//! time. A fetch or decode failure degrades the document (placeholder box)
//! instead of aborting the export.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;

/// Source of the subject photo raster.
pub trait PhotoSource {
    fn fetch(&self, uri: &str) -> Result<DynamicImage>;
}

/// Fetches over HTTP(S) with a bounded request timeout.
pub struct HttpPhotoSource {
    client: reqwest::blocking::Client,
}

impl HttpPhotoSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for photo fetch")?;
        Ok(Self { client })
    }
}

impl PhotoSource for HttpPhotoSource {
    fn fetch(&self, uri: &str) -> Result<DynamicImage> {
        let response = self
            .client
            .get(uri)
            .send()
            .with_context(|| format!("Photo request failed for {uri}"))?
            .error_for_status()
            .with_context(|| format!("Photo request rejected for {uri}"))?;
        let bytes = response
            .bytes()
            .with_context(|| format!("Photo body read failed for {uri}"))?;
        image::load_from_memory(&bytes)
            .with_context(|| format!("Photo at {uri} is not a decodable image"))
    }
}

/// Stand-in for offline runs; always degrades to the placeholder.
#[derive(Debug, Default)]
pub struct OfflinePhotoSource;

impl PhotoSource for OfflinePhotoSource {
    fn fetch(&self, uri: &str) -> Result<DynamicImage> {
        Err(anyhow!("offline mode, skipping photo fetch for {uri}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_source_always_fails() {
        let err = OfflinePhotoSource
            .fetch("https://example.invalid/photo.jpeg")
            .unwrap_err()
            .to_string();
        assert!(err.contains("offline"), "{err}");
    }
}
