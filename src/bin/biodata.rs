use std::path::PathBuf;

use anyhow::Result;
use biodata::config;
use biodata::export::{
    ConsoleStatus, ExportFormat, ExportManifest, ExportOutputEntry, ExportService,
    HttpPhotoSource, OfflinePhotoSource, PhotoSource,
};
use biodata::profile::ProfileStore;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "biodata", about = "Biodata profile viewer and document exporter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the profile summary and gallery order.
    Show {
        #[command(flatten)]
        source: ProfileSource,
        /// Emit the raw profile record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Export the profile to downloadable documents.
    Export {
        #[arg(value_enum)]
        target: ExportTarget,
        #[command(flatten)]
        source: ProfileSource,
        /// Destination directory (defaults to the configured output dir,
        /// then the current directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Write an export manifest with checksums next to the outputs.
        #[arg(long)]
        manifest: bool,
        /// Skip the photo fetch; the PDF gets a placeholder portrait.
        #[arg(long)]
        offline: bool,
    },
}

#[derive(Args)]
struct ProfileSource {
    /// JSON profile file replacing the bundled subject.
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    Pdf,
    Doc,
    All,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let app_config = config::load_or_default()?;

    match cli.command {
        Command::Show { source, json } => {
            let store = load_store(&source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.profile())?);
            } else {
                print_summary(&store);
            }
        }
        Command::Export {
            target,
            source,
            out_dir,
            manifest,
            offline,
        } => {
            let store = load_store(&source)?;
            let out_dir = out_dir
                .or(app_config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&out_dir)?;

            let photos: Box<dyn PhotoSource> = if offline {
                Box::new(OfflinePhotoSource)
            } else {
                Box::new(HttpPhotoSource::new(Duration::from_secs(
                    app_config.export.photo_timeout_secs,
                ))?)
            };
            let status = ConsoleStatus;
            let service = ExportService::new(&app_config.export, photos.as_ref(), &status);

            let outcomes = match target {
                ExportTarget::Pdf => {
                    vec![service.export(store.profile(), ExportFormat::Pdf, &out_dir)?]
                }
                ExportTarget::Doc => {
                    vec![service.export(store.profile(), ExportFormat::Doc, &out_dir)?]
                }
                ExportTarget::All => service.export_all(store.profile(), &out_dir)?,
            };

            for outcome in &outcomes {
                println!(
                    "{} -> {} ({} bytes{})",
                    outcome.format.as_str(),
                    outcome.path.display(),
                    outcome.size_bytes,
                    outcome
                        .pages
                        .map(|count| format!(", {count} pages"))
                        .unwrap_or_default()
                );
            }

            if manifest {
                let mut record = ExportManifest::new(&store.profile().name);
                for outcome in &outcomes {
                    record.add_output(ExportOutputEntry {
                        format: outcome.format.as_str().to_string(),
                        path: outcome.path.clone(),
                        sha256: outcome.sha256.clone(),
                        size_bytes: outcome.size_bytes,
                        pages: outcome.pages,
                    });
                }
                record.completed_at = chrono::Utc::now();
                let path = record.persist(&out_dir)?;
                println!("manifest -> {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_store(source: &ProfileSource) -> Result<ProfileStore> {
    match &source.profile {
        Some(path) => ProfileStore::from_path(path),
        None => ProfileStore::bundled(),
    }
}

fn print_summary(store: &ProfileStore) {
    let profile = store.profile();
    println!("{}", profile.name);
    println!("{}", profile.intro);
    println!();
    println!(
        "Born {} in {}",
        profile.personal_details.birthdate, profile.personal_details.birthplace
    );
    println!("Currently: {}", profile.personal_details.current_status);
    println!(
        "Family: father {}, mother {}, {} sibling(s)",
        profile.family.father.name,
        profile.family.mother.name,
        profile.family.siblings.len()
    );
    println!("Timeline:");
    for entry in &profile.education {
        println!(
            "  [{:?}] {} at {} ({})",
            entry.kind, entry.degree, entry.institution, entry.year
        );
    }
    println!("Contact: {} / {}", profile.contact.phone, profile.contact.email);
    println!("Gallery ({} images, cyclic):", profile.gallery().len());
    for uri in profile.gallery().ring() {
        println!("  {uri}");
    }
}
