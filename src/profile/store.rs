//! Read-only holder for the single profile snapshot.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::{defaults, Profile};

/// Holds the validated profile for the lifetime of the process. Constructed
/// once at startup and passed by reference to every consumer; there is no
/// update path.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile: Profile,
}

impl ProfileStore {
    /// Builds the store from the compiled-in sample record.
    ///
    /// Validation failure here means the bundled data itself is broken, so
    /// callers are expected to treat the error as fatal.
    pub fn bundled() -> Result<Self> {
        Self::from_profile(defaults::sample_profile())
    }

    /// Loads a profile from a JSON artifact, replacing the bundled subject.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("Failed reading profile artifact {}", path.display()))?;
        let profile: Profile = serde_json::from_slice(&data)
            .with_context(|| format!("Failed parsing profile artifact {}", path.display()))?;
        Self::from_profile(profile)
    }

    /// Wraps an already-built record, running the one-shot validation.
    pub fn from_profile(profile: Profile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    /// The snapshot. Total and side-effect-free; every call within the
    /// store's lifetime observes the same value.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}
