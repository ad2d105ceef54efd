//! Typed document description for the export formats.
//!
//! Both writers (PDF and HTML-as-DOC) consume the same `DocumentSpec`, so
//! the exported field subset is decided in exactly one place.

use chrono::{Datelike, NaiveDate};

use crate::profile::{EducationKind, Profile};

/// Structured description of the exported document. Purely data; contains
/// no geometry and no markup.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSpec {
    pub title: String,
    pub subject: String,
    /// URI of the portrait to embed, if any.
    pub photo: Option<String>,
    pub sections: Vec<SectionSpec>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// Two-column label/value table.
    Table(Vec<LabelledRow>),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledRow {
    pub label: String,
    pub value: String,
}

impl LabelledRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl DocumentSpec {
    /// True when any row value, paragraph, or heading contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.sections.iter().any(|section| {
            section.heading.contains(needle)
                || match &section.body {
                    SectionBody::Table(rows) => rows
                        .iter()
                        .any(|row| row.label.contains(needle) || row.value.contains(needle)),
                    SectionBody::Paragraph(text) => text.contains(needle),
                }
        })
    }
}

/// Builds the exported document for a profile.
///
/// The field subset mirrors the displayed biodata: personal details, family,
/// three selected education entries, hobbies, and contact channels.
pub fn biodata_document(profile: &Profile, today: NaiveDate) -> DocumentSpec {
    let details = &profile.personal_details;

    let birthdate_row = match derive_age(&details.birthdate, today) {
        Some(age) => format!("{} (Age: {age} Years)", details.birthdate),
        None => details.birthdate.clone(),
    };
    let personal = vec![
        LabelledRow::new("Date of Birth:", birthdate_row),
        LabelledRow::new("Birth Place:", &details.birthplace),
        LabelledRow::new("Height:", &details.height),
        LabelledRow::new("Weight:", &details.weight),
        LabelledRow::new("Education:", &details.education),
        LabelledRow::new("Current Status:", &details.current_status),
        LabelledRow::new(
            "Religion & Caste:",
            format!("{}, {}", details.religion, details.caste),
        ),
        LabelledRow::new("Zodiac Sign:", &details.zodiac_sign),
        LabelledRow::new("Blood Group:", &details.blood_group),
    ];

    let mut family = vec![
        LabelledRow::new("Father:", member_line(&profile.family.father)),
        LabelledRow::new("Mother:", member_line(&profile.family.mother)),
    ];
    for sibling in &profile.family.siblings {
        family.push(LabelledRow::new(
            format!("{}:", sibling.relation),
            member_line(sibling),
        ));
    }

    let sections = vec![
        SectionSpec {
            heading: "Personal Details".into(),
            body: SectionBody::Table(personal),
        },
        SectionSpec {
            heading: "Family Details".into(),
            body: SectionBody::Table(family),
        },
        SectionSpec {
            heading: "Education & Career".into(),
            body: SectionBody::Table(education_rows(profile)),
        },
        SectionSpec {
            heading: "Hobbies & Interests".into(),
            body: SectionBody::Paragraph(details.hobbies.clone()),
        },
        SectionSpec {
            heading: "Contact Details".into(),
            body: SectionBody::Table(vec![
                LabelledRow::new("Phone:", &profile.contact.phone),
                LabelledRow::new("Father's Phone:", &profile.contact.father_phone),
                LabelledRow::new("Email:", &profile.contact.email),
                LabelledRow::new("Address:", &profile.contact.address),
            ]),
        },
    ];

    DocumentSpec {
        title: "Biodata".into(),
        subject: profile.name.clone(),
        photo: Some(profile.profile_image.clone()),
        sections,
        footer: format!("© {} {} | Biodata", today.year(), profile.name),
    }
}

fn member_line(member: &crate::profile::FamilyMember) -> String {
    match &member.occupation {
        Some(occupation) => format!("{} ({occupation})", member.name),
        None => member.name.clone(),
    }
}

/// Three selected timeline rows: the first two `education` entries as
/// current and completed studies, plus the first `experience` entry. Rows
/// are skipped when the timeline has no matching entry.
fn education_rows(profile: &Profile) -> Vec<LabelledRow> {
    let mut studies = profile
        .education
        .iter()
        .filter(|entry| entry.kind == EducationKind::Education);
    let mut rows = Vec::with_capacity(3);
    if let Some(entry) = studies.next() {
        rows.push(LabelledRow::new(
            "Current:",
            format!("{} at {} ({})", entry.degree, entry.institution, entry.year),
        ));
    }
    if let Some(entry) = studies.next() {
        rows.push(LabelledRow::new(
            "Graduation:",
            format!("{} from {} ({})", entry.degree, entry.institution, entry.year),
        ));
    }
    if let Some(entry) = profile
        .education
        .iter()
        .find(|entry| entry.kind == EducationKind::Experience)
    {
        rows.push(LabelledRow::new(
            "Experience:",
            format!("{} at {} ({})", entry.degree, entry.institution, entry.year),
        ));
    }
    rows
}

/// Derives the age in whole years from the free-text birthdate, when it
/// parses as an English long date ("June 27, 2003").
fn derive_age(birthdate: &str, today: NaiveDate) -> Option<u32> {
    let birth = NaiveDate::parse_from_str(birthdate.trim(), "%B %d, %Y").ok()?;
    today.years_since(birth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::defaults::sample_profile;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn sample_document_carries_family_strings() {
        let doc = biodata_document(&sample_profile(), fixed_today());
        assert!(doc.contains_text("HDFC Bank Senior Manager"));
        assert!(doc.contains_text("Chauhan YuvraniKuvarba Vikramsinh"));
    }

    #[test]
    fn education_section_selects_three_rows() {
        let doc = biodata_document(&sample_profile(), fixed_today());
        let section = doc
            .sections
            .iter()
            .find(|s| s.heading == "Education & Career")
            .unwrap();
        let SectionBody::Table(rows) = &section.body else {
            panic!("education section must be a table");
        };
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, ["Current:", "Graduation:", "Experience:"]);
        assert!(rows[2].value.contains("Web Developer Intern"));
    }

    #[test]
    fn age_is_derived_from_parseable_birthdates_only() {
        assert_eq!(derive_age("June 27, 2003", fixed_today()), Some(21));
        assert_eq!(derive_age("around 2003", fixed_today()), None);
        let doc = biodata_document(&sample_profile(), fixed_today());
        assert!(doc.contains_text("(Age: 21 Years)"));
    }

    #[test]
    fn footer_uses_the_supplied_year() {
        let doc = biodata_document(&sample_profile(), fixed_today());
        assert_eq!(
            doc.footer,
            "© 2025 Chauhan Vishvarajsinh Vikramsinh | Biodata"
        );
    }
}
