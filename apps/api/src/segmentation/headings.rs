//! Recognized section headings, Danish and English, all lower-case.

use once_cell::sync::Lazy;

use crate::models::profile::SectionLabel;

pub const EXPERIENCE_HEADINGS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "erfaring",
    "erhvervserfaring",
    "arbejdserfaring",
    "beskæftigelse",
    "ansættelser",
];

pub const EDUCATION_HEADINGS: &[&str] = &[
    "education",
    "academic background",
    "educational background",
    "uddannelse",
    "uddannelser",
    "studier",
];

pub const SKILLS_HEADINGS: &[&str] = &[
    "skills",
    "kompetencer",
    "færdigheder",
    "kvalifikationer",
    "technical skills",
    "tekniske kompetencer",
    "core competencies",
    "kernekompetencer",
];

pub const CONTACT_HEADINGS: &[&str] = &[
    "contact",
    "contact information",
    "kontakt",
    "kontaktoplysninger",
    "personal information",
    "personlige oplysninger",
];

/// Headings that only ever end a section.
pub const AUXILIARY_HEADINGS: &[&str] = &[
    "projects",
    "projekter",
    "certifications",
    "certificeringer",
    "references",
    "referencer",
    "languages",
    "sprog",
    "interests",
    "interesser",
];

pub fn headings_for(label: SectionLabel) -> &'static [&'static str] {
    match label {
        SectionLabel::Experience => EXPERIENCE_HEADINGS,
        SectionLabel::Education => EDUCATION_HEADINGS,
        SectionLabel::Skills => SKILLS_HEADINGS,
        SectionLabel::Contact => CONTACT_HEADINGS,
    }
}

/// Every recognized heading; any of them ends the section before it.
pub static ALL_HEADINGS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    [
        EXPERIENCE_HEADINGS,
        EDUCATION_HEADINGS,
        SKILLS_HEADINGS,
        CONTACT_HEADINGS,
        AUXILIARY_HEADINGS,
    ]
    .concat()
});

/// True when a whole line reads as a section heading, e.g. "Uddannelse:".
pub fn is_heading_line(line: &str) -> bool {
    let normalized = line.trim().trim_end_matches(':').trim().to_lowercase();
    !normalized.is_empty() && ALL_HEADINGS.iter().any(|h| *h == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_lists_are_lower_case() {
        for heading in ALL_HEADINGS.iter() {
            assert_eq!(*heading, heading.to_lowercase(), "{heading} must be lower-case");
        }
    }

    #[test]
    fn test_is_heading_line() {
        assert!(is_heading_line("Uddannelse"));
        assert!(is_heading_line("  TECHNICAL SKILLS: "));
        assert!(is_heading_line("Færdigheder"));
        assert!(!is_heading_line("Jens Hansen"));
        assert!(!is_heading_line(""));
    }
}
