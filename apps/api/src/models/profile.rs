use serde::{Deserialize, Serialize};

/// A labeled region of résumé text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLabel {
    Experience,
    Education,
    Skills,
    Contact,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 4] = [
        SectionLabel::Experience,
        SectionLabel::Education,
        SectionLabel::Skills,
        SectionLabel::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Skills => "skills",
            SectionLabel::Contact => "contact",
        }
    }
}

/// Fields of the profile form that extraction can pre-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Address,
    Skills,
    Education,
    Experience,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
            ProfileField::Skills => "skills",
            ProfileField::Education => "education",
            ProfileField::Experience => "experience",
        }
    }
}

/// A text snippet with an extraction certainty in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSnippet {
    pub text: String,
    pub confidence: f64,
}

/// Candidate content for one section. Upstream sources deliver either a
/// single string (implicit confidence 1.0) or a list of scored snippets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionCandidate {
    PlainText(String),
    ScoredList(Vec<ScoredSnippet>),
}

/// Contact details found by the narrow heuristics. `None` means "not found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Unvalidated field values handed to the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidateFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub skills: Option<SectionCandidate>,
    #[serde(default)]
    pub education: Option<SectionCandidate>,
    #[serde(default)]
    pub experience: Option<SectionCandidate>,
}

impl RawCandidateFields {
    pub fn from_contact(contact: ContactFields) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            address: contact.address,
            ..Self::default()
        }
    }
}

/// The only artifact that leaves the pipeline: fields that passed
/// validation, plus the list of which ones were accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedProfileFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    pub extracted_fields: Vec<ProfileField>,
}

impl ValidatedProfileFragment {
    pub fn is_empty(&self) -> bool {
        self.extracted_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_candidate_accepts_plain_string() {
        let c: SectionCandidate = serde_json::from_str(r#""Rust, Go""#).unwrap();
        assert_eq!(c, SectionCandidate::PlainText("Rust, Go".to_string()));
    }

    #[test]
    fn test_section_candidate_accepts_scored_list() {
        let c: SectionCandidate =
            serde_json::from_str(r#"[{"text": "Rust", "confidence": 0.9}]"#).unwrap();
        match c {
            SectionCandidate::ScoredList(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].text, "Rust");
            }
            other => panic!("expected scored list, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_candidates_missing_fields_default_to_none() {
        let raw: RawCandidateFields = serde_json::from_str(r#"{"email": "a@b.co"}"#).unwrap();
        assert_eq!(raw.email.as_deref(), Some("a@b.co"));
        assert!(raw.name.is_none());
        assert!(raw.skills.is_none());
    }

    #[test]
    fn test_fragment_serializes_camel_case_and_omits_absent_fields() {
        let fragment = ValidatedProfileFragment {
            email: Some("a@b.co".to_string()),
            extracted_fields: vec![ProfileField::Email],
            ..Default::default()
        };
        let json = serde_json::to_value(&fragment).unwrap();
        assert_eq!(json["extractedFields"][0], "email");
        assert!(json.get("name").is_none());
    }
}
