use std::fs;

use anyhow::Result;
use biodata::config::ExportSettings;
use biodata::export::manifest::{read_manifest, ExportManifest, ExportOutputEntry};
use biodata::export::notify::CountingStatus;
use biodata::export::pagination;
use biodata::export::{layout, template, ExportFormat, ExportService, PhotoSource};
use biodata::profile::ProfileStore;
use image::{DynamicImage, Rgb, RgbImage};
use tempfile::TempDir;

/// Deterministic stand-in for the blob-storage portrait.
struct StubPhotos;

impl PhotoSource for StubPhotos {
    fn fetch(&self, _uri: &str) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            60,
            80,
            Rgb([120, 90, 60]),
        )))
    }
}

fn settings() -> ExportSettings {
    ExportSettings::default()
}

#[test]
fn export_all_commits_both_documents() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let outcomes = service.export_all(store.profile(), out.path())?;
    assert_eq!(outcomes.len(), 2);

    let pdf = &outcomes[0];
    assert_eq!(pdf.format, ExportFormat::Pdf);
    assert_eq!(
        pdf.path.file_name().unwrap().to_str().unwrap(),
        "Vishvarajsinh_Biodata.pdf"
    );
    let pdf_bytes = fs::read(&pdf.path)?;
    assert!(pdf_bytes.starts_with(b"%PDF"), "output must be a PDF");
    assert!(pdf.pages.unwrap_or(0) >= 1);

    let doc = &outcomes[1];
    assert_eq!(
        doc.path.file_name().unwrap().to_str().unwrap(),
        "Vishvarajsinh_Biodata.doc"
    );
    let markup = fs::read_to_string(&doc.path)?;
    assert!(markup.starts_with("<!DOCTYPE html>"), "doc output is markup");
    assert!(markup.contains("HDFC Bank Senior Manager"));
    assert!(markup.contains("Chauhan YuvraniKuvarba Vikramsinh"));

    // Staging scratch space is gone on the success path.
    let staging_root = out.path().join(".staging");
    let leftovers = staging_root
        .read_dir()
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0, "staging dirs must be removed after commit");
    Ok(())
}

#[test]
fn outcome_checksums_match_committed_files() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let outcome = service.export(store.profile(), ExportFormat::Doc, out.path())?;
    let rehashed = biodata::export::manifest::hash_path(&outcome.path)?;
    assert_eq!(outcome.sha256, rehashed);
    assert_eq!(outcome.size_bytes, fs::metadata(&outcome.path)?.len());
    Ok(())
}

#[test]
fn pending_status_clears_exactly_once_on_success() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    service.export(store.profile(), ExportFormat::Pdf, out.path())?;
    assert_eq!(status.pending.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(status.cleared_count(), 1);
    assert_eq!(status.success.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(status.failure.load(std::sync::atomic::Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn failure_is_caught_reported_and_cleared() -> Result<()> {
    let out = TempDir::new()?;
    // An out_dir that is actually a file makes the staging step fail.
    let bogus = out.path().join("not-a-dir");
    fs::write(&bogus, b"occupied")?;

    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let result = service.export(store.profile(), ExportFormat::Pdf, &bogus);
    assert!(result.is_err(), "export reports the failure to the caller");
    assert_eq!(status.cleared_count(), 1, "pending cleared on failure too");
    assert_eq!(status.failure.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(status.success.load(std::sync::atomic::Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn degenerate_render_scale_fails_cleanly() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let mut cfg = settings();
    cfg.render_scale = 0.0;
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let result = service.export(store.profile(), ExportFormat::Pdf, out.path());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("render_scale"), "{err}");
    assert_eq!(status.failure.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(status.cleared_count(), 1, "pending cleared on failure");
    assert_eq!(out.path().read_dir()?.count(), 0, "nothing committed");
    Ok(())
}

#[test]
fn overlapping_exports_are_rejected_not_queued() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let session = service.begin()?;
    let err = service
        .export(store.profile(), ExportFormat::Doc, out.path())
        .unwrap_err()
        .to_string();
    assert!(err.contains("already in progress"), "{err}");

    drop(session);
    service.export(store.profile(), ExportFormat::Doc, out.path())?;
    Ok(())
}

#[test]
fn page_count_follows_canvas_height() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let outcome = service.export(store.profile(), ExportFormat::Pdf, out.path())?;

    let document =
        template::biodata_document(store.profile(), chrono::Utc::now().date_naive());
    let canvas = layout::lay_out(&document, cfg.render_scale);
    let expected =
        pagination::page_count(canvas.height, layout::page_height_px(cfg.render_scale));
    assert_eq!(outcome.pages, Some(expected));
    if canvas.height > layout::page_height_px(cfg.render_scale) {
        assert!(expected > 1);
    } else {
        assert_eq!(expected, 1);
    }
    Ok(())
}

#[test]
fn manifest_round_trips_with_checksums() -> Result<()> {
    let out = TempDir::new()?;
    let store = ProfileStore::bundled()?;
    let cfg = settings();
    let status = CountingStatus::default();
    let photos = StubPhotos;
    let service = ExportService::new(&cfg, &photos, &status);

    let outcomes = service.export_all(store.profile(), out.path())?;
    let mut manifest = ExportManifest::new(&store.profile().name);
    for outcome in &outcomes {
        manifest.add_output(ExportOutputEntry {
            format: outcome.format.as_str().to_string(),
            path: outcome.path.clone(),
            sha256: outcome.sha256.clone(),
            size_bytes: outcome.size_bytes,
            pages: outcome.pages,
        });
    }
    let path = manifest.persist(out.path())?;
    let loaded = read_manifest(&path)?;
    assert_eq!(loaded.export_id, manifest.export_id);
    assert_eq!(loaded.outputs.len(), 2);
    for entry in &loaded.outputs {
        assert_eq!(
            entry.sha256,
            biodata::export::manifest::hash_path(&entry.path)?
        );
    }
    Ok(())
}
