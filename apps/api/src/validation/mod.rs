//! Field Validator — keeps only the candidate fields that pass their format
//! checks, sanitized, and records which fields were accepted.
//!
//! Rejection is not an error: a dropped field is simply left for the user to
//! fill in by hand.

pub mod sanitize;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::{
    ProfileField, RawCandidateFields, SectionCandidate, ValidatedProfileFragment,
};
use crate::observer::{PipelineEvent, PipelineObserver};
use sanitize::sanitize_html;

/// Scored snippets must be strictly above this confidence to be kept.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Danish "could not identify": the prefix of every not-found placeholder.
pub const NOT_FOUND_PHRASE: &str = "Kunne ikke identificere";

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

type Verdict = Result<String, &'static str>;

pub fn validate(
    raw: &RawCandidateFields,
    observer: &dyn PipelineObserver,
) -> ValidatedProfileFragment {
    let mut fragment = ValidatedProfileFragment::default();

    let verdicts: [(ProfileField, Option<Verdict>); 7] = [
        (ProfileField::Name, raw.name.as_deref().map(check_name)),
        (ProfileField::Email, raw.email.as_deref().map(check_email)),
        (ProfileField::Phone, raw.phone.as_deref().map(check_phone)),
        (ProfileField::Address, raw.address.as_deref().map(check_address)),
        (ProfileField::Skills, raw.skills.as_ref().map(check_section)),
        (ProfileField::Education, raw.education.as_ref().map(check_section)),
        (ProfileField::Experience, raw.experience.as_ref().map(check_section)),
    ];

    for (field, verdict) in verdicts {
        match verdict {
            None => {}
            Some(Err(reason)) => observer.record(PipelineEvent::FieldRejected { field, reason }),
            Some(Ok(value)) => {
                observer.record(PipelineEvent::FieldAccepted { field });
                set_field(&mut fragment, field, value);
                fragment.extracted_fields.push(field);
            }
        }
    }

    fragment
}

fn set_field(fragment: &mut ValidatedProfileFragment, field: ProfileField, value: String) {
    let slot = match field {
        ProfileField::Name => &mut fragment.name,
        ProfileField::Email => &mut fragment.email,
        ProfileField::Phone => &mut fragment.phone,
        ProfileField::Address => &mut fragment.address,
        ProfileField::Skills => &mut fragment.skills,
        ProfileField::Education => &mut fragment.education,
        ProfileField::Experience => &mut fragment.experience,
    };
    *slot = Some(value);
}

fn check_name(value: &str) -> Verdict {
    let clean = sanitize_html(value);
    if clean.chars().count() > 3 {
        Ok(clean)
    } else {
        Err("name shorter than 4 characters")
    }
}

fn check_email(value: &str) -> Verdict {
    let clean = sanitize_html(value);
    if EMAIL_SHAPE_RE.is_match(&clean) {
        Ok(clean)
    } else {
        Err("not an email address")
    }
}

fn check_phone(value: &str) -> Verdict {
    let clean = sanitize_html(value);
    if clean.chars().filter(|c| c.is_ascii_digit()).count() >= 8 {
        Ok(clean)
    } else {
        Err("fewer than 8 digits")
    }
}

fn check_address(value: &str) -> Verdict {
    let clean = sanitize_html(value);
    if clean.chars().count() > 5 {
        Ok(clean)
    } else {
        Err("address shorter than 6 characters")
    }
}

fn check_section(candidate: &SectionCandidate) -> Verdict {
    match candidate {
        SectionCandidate::PlainText(text) => {
            let clean = sanitize_html(text);
            if clean.chars().count() <= 10 {
                Err("section shorter than 11 characters")
            } else if clean.contains(NOT_FOUND_PHRASE) {
                Err("not-found placeholder")
            } else {
                Ok(clean)
            }
        }
        SectionCandidate::ScoredList(snippets) => {
            let kept: Vec<String> = snippets
                .iter()
                .filter(|s| s.confidence > CONFIDENCE_THRESHOLD)
                .map(|s| sanitize_html(&s.text))
                .filter(|t| !t.is_empty())
                .collect();
            if kept.is_empty() {
                Err("no snippet above the confidence threshold")
            } else {
                Ok(kept.join("\n\n"))
            }
        }
    }
}
