//! The biodata profile: one person's identity, family, education timeline,
//! and contact channels.
//!
//! The record is constructed once at startup (from the bundled sample or a
//! JSON file), validated, and never mutated afterwards. Consumers receive
//! `&Profile` and may rely on every field being present.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub mod defaults;
pub mod store;

pub use store::ProfileStore;

/// Root record for the subject person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub intro: String,
    /// Primary portrait, an absolute URI into external blob storage.
    pub profile_image: String,
    /// Gallery images; sequence order is display order.
    #[serde(default)]
    pub additional_images: Vec<String>,
    pub personal_details: PersonalDetails,
    pub family: Family,
    pub education: Vec<EducationEntry>,
    pub contact: Contact,
}

/// Free-text personal attributes. None of these are validated individually;
/// display and export templates assume all of them are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub birthdate: String,
    pub birthplace: String,
    pub height: String,
    pub weight: String,
    pub education: String,
    pub current_status: String,
    pub religion: String,
    pub caste: String,
    pub zodiac_sign: String,
    pub blood_group: String,
    pub hobbies: String,
}

/// One relative. `relation` labels the entry ("Father", "Sister", ...) but
/// is not enforced unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub relation: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

/// Father and mother are mandatory singletons; siblings may be empty and
/// keep author order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub father: FamilyMember,
    pub mother: FamilyMember,
    #[serde(default)]
    pub siblings: Vec<FamilyMember>,
}

/// One row of the education/career timeline. `year` is free text, not a
/// structured date; entries keep the order the data author chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EducationKind,
}

/// Closed set of timeline entry kinds. Drives icon/label selection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationKind {
    Education,
    Award,
    Experience,
}

/// Contact channels. Phone/email are opaque strings; whatsapp/instagram are
/// external links that are never dereferenced by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub address: String,
    pub phone: String,
    pub father_phone: String,
    pub whatsapp: String,
    pub instagram: String,
    pub email: String,
}

impl Profile {
    /// Validates the record once at construction time. All violations are
    /// collected and reported together so a broken profile file can be
    /// fixed in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_string());
        }
        match Url::parse(&self.profile_image) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => problems.push(format!(
                "profileImage must be an http(s) URI, got scheme '{}'",
                url.scheme()
            )),
            Err(err) => problems.push(format!("profileImage is not a valid URI: {err}")),
        }
        if self.family.father.name.trim().is_empty() {
            problems.push("family.father.name must not be empty".to_string());
        }
        if self.family.mother.name.trim().is_empty() {
            problems.push("family.mother.name must not be empty".to_string());
        }
        for (index, sibling) in self.family.siblings.iter().enumerate() {
            if sibling.name.trim().is_empty() {
                problems.push(format!("family.siblings[{index}].name must not be empty"));
            }
        }
        if self.education.is_empty() {
            problems.push("education must contain at least one entry".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            bail!("invalid profile: {}", problems.join("; "));
        }
    }

    /// All displayable images in display order: the portrait first, then the
    /// gallery sequence.
    pub fn gallery(&self) -> Gallery<'_> {
        Gallery::new(self)
    }
}

/// Cyclic cursor over the profile's images. Advancing past the last image
/// wraps to the first and retreating before the first wraps to the last.
#[derive(Debug)]
pub struct Gallery<'a> {
    images: Vec<&'a str>,
    index: usize,
}

impl<'a> Gallery<'a> {
    fn new(profile: &'a Profile) -> Self {
        let mut images = Vec::with_capacity(1 + profile.additional_images.len());
        images.push(profile.profile_image.as_str());
        images.extend(profile.additional_images.iter().map(String::as_str));
        Self { images, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current(&self) -> &'a str {
        self.images[self.index]
    }

    pub fn advance(&mut self) -> &'a str {
        self.index = (self.index + 1) % self.images.len();
        self.current()
    }

    pub fn retreat(&mut self) -> &'a str {
        self.index = (self.index + self.images.len() - 1) % self.images.len();
        self.current()
    }

    /// Display order, starting from the current position.
    pub fn ring(&self) -> impl Iterator<Item = &'a str> + '_ {
        let count = self.images.len();
        (0..count).map(move |offset| self.images[(self.index + offset) % count])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_profile_passes_validation() {
        defaults::sample_profile().validate().unwrap();
    }

    #[test]
    fn validation_collects_all_problems() {
        let mut profile = defaults::sample_profile();
        profile.name.clear();
        profile.profile_image = "not a uri".into();
        profile.education.clear();
        let err = profile.validate().unwrap_err().to_string();
        assert!(err.contains("name must not be empty"), "{err}");
        assert!(err.contains("profileImage"), "{err}");
        assert!(err.contains("education"), "{err}");
    }

    #[test]
    fn education_kind_uses_lowercase_wire_names() {
        let entry = &defaults::sample_profile().education[2];
        let value = serde_json::to_value(entry).unwrap();
        assert_eq!(value["type"], "award");
    }

    #[test]
    fn gallery_wraps_in_both_directions() {
        let profile = defaults::sample_profile();
        let mut gallery = profile.gallery();
        let first = gallery.current().to_string();
        for _ in 0..gallery.len() {
            gallery.advance();
        }
        assert_eq!(gallery.current(), first, "full loop returns to start");
        gallery.retreat();
        let last = profile.additional_images.last().unwrap();
        assert_eq!(gallery.current(), last, "retreat from start wraps to end");
    }
}
