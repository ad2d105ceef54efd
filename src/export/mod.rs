//! Document export adapter.
//!
//! Converts the profile into downloadable documents: a paginated A4 PDF and
//! an HTML-as-DOC file. The pipeline is template -> layout -> pagination ->
//! writer; data formatting stays separate from the page-split policy so the
//! mid-row page break behavior remains an explicit, tested stage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use uuid::Uuid;

pub mod doc;
pub mod layout;
pub mod manifest;
pub mod notify;
pub mod pagination;
pub mod pdf;
pub mod photo;
pub mod template;

pub use manifest::{ExportManifest, ExportOutputEntry};
pub use notify::{ConsoleStatus, StatusSink};
pub use photo::{HttpPhotoSource, OfflinePhotoSource, PhotoSource};

use crate::config::ExportSettings;
use crate::profile::Profile;
use notify::PendingGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Doc,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Doc => "doc",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Doc => "DOC",
        }
    }
}

/// One committed output file.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: u64,
    /// Page count for the PDF; `None` for single-stream formats.
    pub pages: Option<usize>,
}

/// Runs exports for one profile. At most one export session may be in
/// flight at a time; a second invocation while one runs is rejected rather
/// than queued, the library analog of disabling the trigger button.
pub struct ExportService<'a> {
    settings: &'a ExportSettings,
    photos: &'a dyn PhotoSource,
    status: &'a dyn StatusSink,
    in_flight: AtomicBool,
}

/// Reserved export slot; dropping it frees the slot.
pub struct ExportSession<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ExportSession<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl<'a> ExportService<'a> {
    pub fn new(
        settings: &'a ExportSettings,
        photos: &'a dyn PhotoSource,
        status: &'a dyn StatusSink,
    ) -> Self {
        Self {
            settings,
            photos,
            status,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Reserves the single export slot, failing if an export is running.
    pub fn begin(&self) -> Result<ExportSession<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            bail!("an export is already in progress; wait for it to finish");
        }
        Ok(ExportSession {
            flag: &self.in_flight,
        })
    }

    /// Exports one format. The returned error is already reported through
    /// the status sink; callers decide whether to log or exit non-zero.
    pub fn export(
        &self,
        profile: &Profile,
        format: ExportFormat,
        out_dir: &Path,
    ) -> Result<ExportOutcome> {
        let _session = self.begin()?;
        self.run(profile, format, out_dir)
    }

    /// Exports both formats inside one session.
    pub fn export_all(&self, profile: &Profile, out_dir: &Path) -> Result<Vec<ExportOutcome>> {
        let _session = self.begin()?;
        let mut outcomes = Vec::with_capacity(2);
        for format in [ExportFormat::Pdf, ExportFormat::Doc] {
            outcomes.push(self.run(profile, format, out_dir)?);
        }
        Ok(outcomes)
    }

    fn run(&self, profile: &Profile, format: ExportFormat, out_dir: &Path) -> Result<ExportOutcome> {
        let guard = PendingGuard::begin(self.status, &format!("Generating {}...", format.label()));
        match self.render(profile, format, out_dir) {
            Ok(outcome) => {
                self.status.success(&format!(
                    "{} saved to {}",
                    format.label(),
                    outcome.path.display()
                ));
                guard.dismiss();
                Ok(outcome)
            }
            Err(err) => {
                log::error!("{} export failed: {err:#}", format.label());
                self.status.failure(&format!(
                    "Failed to generate {}. Please try again.",
                    format.label()
                ));
                // Guard drop dismisses the pending notification.
                Err(err)
            }
        }
    }

    fn render(
        &self,
        profile: &Profile,
        format: ExportFormat,
        out_dir: &Path,
    ) -> Result<ExportOutcome> {
        // Settings may come from a hand-edited config file; a degenerate
        // scale must fail the export, not blow up inside pagination.
        self.settings.validate()?;
        let document = template::biodata_document(profile, Utc::now().date_naive());
        let file_name = format!(
            "{}_Biodata.{}",
            export_file_stem(&profile.name),
            format.as_str()
        );
        let staging = StagingDir::create(out_dir)?;
        let staged_path = staging.path().join(&file_name);

        let pages = match format {
            ExportFormat::Pdf => {
                let scale = self.settings.render_scale;
                let canvas = layout::lay_out(&document, scale);
                let pages = pagination::paginate(&canvas, layout::page_height_px(scale));
                let photo = document.photo.as_deref().and_then(|uri| {
                    match self.photos.fetch(uri) {
                        Ok(image) => Some(image),
                        Err(err) => {
                            // Missing photo degrades the page, it does not
                            // abort the export.
                            log::warn!("continuing without photo: {err:#}");
                            None
                        }
                    }
                });
                let count = pdf::write_pdf(
                    &document.title,
                    &pages,
                    photo.as_ref(),
                    self.settings,
                    &staged_path,
                )?;
                Some(count)
            }
            ExportFormat::Doc => {
                doc::write_doc(&document, &staged_path)?;
                None
            }
        };

        let final_path = out_dir.join(&file_name);
        fs::copy(&staged_path, &final_path).with_context(|| {
            format!(
                "Failed to commit {} to {}",
                staged_path.display(),
                final_path.display()
            )
        })?;

        let metadata = fs::metadata(&final_path)
            .with_context(|| format!("Missing output {}", final_path.display()))?;
        Ok(ExportOutcome {
            format,
            path: final_path.clone(),
            sha256: manifest::hash_path(&final_path)?,
            size_bytes: metadata.len(),
            pages,
        })
    }
}

/// Scratch directory for one render; removed again on every exit path.
struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    fn create(out_dir: &Path) -> Result<Self> {
        let path = out_dir.join(".staging").join(Uuid::new_v4().to_string());
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create staging dir {}", path.display()))?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            log::debug!("staging cleanup skipped: {err}");
        }
    }
}

/// Filename stem for the export outputs: the subject's given-name token
/// (second word of the full name, which leads with the surname), sanitized
/// for filesystem use.
pub fn export_file_stem(name: &str) -> String {
    let token = {
        let mut words = name.split_whitespace();
        let first = words.next().unwrap_or("Biodata");
        words.next().unwrap_or(first)
    };
    token
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_uses_the_given_name_token() {
        assert_eq!(
            export_file_stem("Chauhan Vishvarajsinh Vikramsinh"),
            "Vishvarajsinh"
        );
        assert_eq!(export_file_stem("Mononym"), "Mononym");
        assert_eq!(export_file_stem("X a/b"), "a_b");
        assert_eq!(export_file_stem(""), "Biodata");
    }
}
