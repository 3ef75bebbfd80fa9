//! Section Segmenter — locates experience, education, skills, and contact
//! sections in a plain-text résumé.
//!
//! A section starts at a recognized heading and runs until the next
//! recognized heading of any kind. Headings are matched as plain substrings,
//! so a heading word inside ordinary prose still counts as a boundary.

pub mod contact;
pub mod headings;

use std::str::FromStr;

use serde::Serialize;

use crate::models::profile::SectionLabel;
use crate::observer::{PipelineEvent, PipelineObserver};
use headings::{headings_for, ALL_HEADINGS};

/// How to choose between several headings for the same section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnchorStrategy {
    /// The heading that occurs first in the text; ties go to the longer heading.
    #[default]
    Earliest,
    /// The first synonym in list order that occurs anywhere, wherever it is.
    FirstListed,
}

impl FromStr for AnchorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earliest" => Ok(AnchorStrategy::Earliest),
            "first-listed" | "first_listed" => Ok(AnchorStrategy::FirstListed),
            other => Err(format!(
                "unknown section anchor strategy '{other}' (expected 'earliest' or 'first-listed')"
            )),
        }
    }
}

/// Best-effort section bodies; `None` when no heading was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub contact: Option<String>,
}

impl Sections {
    pub fn get(&self, label: SectionLabel) -> Option<&str> {
        match label {
            SectionLabel::Experience => self.experience.as_deref(),
            SectionLabel::Education => self.education.as_deref(),
            SectionLabel::Skills => self.skills.as_deref(),
            SectionLabel::Contact => self.contact.as_deref(),
        }
    }

    fn set(&mut self, label: SectionLabel, body: String) {
        let slot = match label {
            SectionLabel::Experience => &mut self.experience,
            SectionLabel::Education => &mut self.education,
            SectionLabel::Skills => &mut self.skills,
            SectionLabel::Contact => &mut self.contact,
        };
        *slot = Some(body);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    anchor: AnchorStrategy,
}

impl Segmenter {
    pub fn new(anchor: AnchorStrategy) -> Self {
        Self { anchor }
    }

    pub fn segment(&self, text: &str, observer: &dyn PipelineObserver) -> Sections {
        let folded = fold_case(text);
        let mut sections = Sections::default();

        for label in SectionLabel::ALL {
            let Some((start, heading)) = self.find_anchor(label, &folded) else {
                observer.record(PipelineEvent::SectionMissing { label });
                continue;
            };

            let end = section_end(&folded, start + heading.len());
            observer.record(PipelineEvent::SectionLocated {
                label,
                heading: heading.to_string(),
                start,
                end,
            });

            let body = strip_heading(text[start..end].trim(), heading.len());
            if body.is_empty() {
                observer.record(PipelineEvent::SectionMissing { label });
            } else {
                sections.set(label, body.to_string());
            }
        }

        sections
    }

    fn find_anchor(&self, label: SectionLabel, folded: &str) -> Option<(usize, &'static str)> {
        let synonyms = headings_for(label);
        match self.anchor {
            AnchorStrategy::FirstListed => synonyms
                .iter()
                .find_map(|h| folded.find(h).map(|i| (i, *h))),
            AnchorStrategy::Earliest => synonyms
                .iter()
                .filter_map(|h| folded.find(h).map(|i| (i, *h)))
                .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len()))),
        }
    }
}

/// Index of the nearest recognized heading at or after `from`, or the end of
/// the text.
fn section_end(folded: &str, from: usize) -> usize {
    let rest = &folded[from..];
    ALL_HEADINGS
        .iter()
        .filter_map(|h| rest.find(h))
        .min()
        .map(|i| from + i)
        .unwrap_or(folded.len())
}

/// Drops the heading line: skip past the first newline, else past the first
/// ". ", else past the heading itself.
fn strip_heading(section: &str, heading_len: usize) -> &str {
    let body = if let Some(nl) = section.find('\n') {
        &section[nl + 1..]
    } else if let Some(dot) = section.find(". ") {
        &section[dot + 2..]
    } else {
        section
            .get(heading_len..)
            .unwrap_or("")
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
    };
    body.trim()
}

/// Lower-cases `text` without changing any byte offsets, so indices found in
/// the folded copy slice the original. Characters whose lower-case form has
/// a different UTF-8 length are left as they are.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
                _ => c,
            }
        })
        .collect()
}
