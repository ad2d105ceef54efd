pub mod config;
pub mod export;
pub mod profile;

// Re-export commonly used types for convenience.
pub use config::{AppConfig, ExportSettings};
pub use export::{ExportFormat, ExportOutcome, ExportService};
pub use profile::{Profile, ProfileStore};
