//! Name and contact-detail heuristics. These run over the whole transcript
//! (email prefers the contact section) and are independent of section
//! boundaries otherwise.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::ContactFields;
use crate::segmentation::headings::is_heading_line;
use crate::segmentation::Sections;

static NAME_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*(?:name|navn)[ \t]*:[ \t]*(.+?)[ \t]*$").unwrap());

/// Title lines that head a résumé but are never a person's name.
static TITLE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:cv|curriculum vitae|resume|resumé|résumé|profil|profile|om mig|about me)$")
        .unwrap()
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Phone patterns, most specific first. The first pattern with any match wins.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // International with separators: +45 12 34 56 78, +1 (555) 123-4567
        r"\+\d{1,3}[ .-]?\(?\d{1,4}\)?(?:[ .-]?\d{2,4}){2,4}",
        // Danish pairs: 12 34 56 78
        r"\b\d{2}[ .-]\d{2}[ .-]\d{2}[ .-]\d{2}\b",
        // North American: (555) 123-4567, 555.123.4567
        r"(?:\(\d{3}\)|\b\d{3})[ .-]?\d{3}[ .-]\d{4}\b",
        // Bare digit run
        r"\b\d{8,10}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Address patterns, first match wins.
static ADDRESS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 1600 Pennsylvania Avenue, Washington, DC 20500
        r"\d+[ \t]+[A-Za-z0-9 .]+?[ \t]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way)\.?,?[ \t]+[A-Za-z .]+?,[ \t]*[A-Z]{2}[ \t]+\d{5}(?:-\d{4})?",
        // Nørregade 12, 1165 København K
        r"\p{Lu}[\p{L}.\- ]*?[ \t]\d+[A-Za-z]?,[ \t]*\d{4}[ \t]+\p{Lu}\p{L}*(?:[ \t]+\p{Lu}\p{L}*)?",
        // Vesterbrogade 45, 3. th, 1620 København V
        r"\p{Lu}[\p{L}.\- ]*?[ \t]\d+[A-Za-z]?,[ \t]*\d{1,2}\.?[ \t]*(?:th|tv|mf|sal)?\.?,[ \t]*\d{4}[ \t]+\p{Lu}\p{L}*(?:[ \t]+\p{Lu}\p{L}*)?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn extract_contact(text: &str, sections: &Sections) -> ContactFields {
    ContactFields {
        name: extract_name(text),
        email: extract_email(text, sections.contact.as_deref()),
        phone: extract_phone(text),
        address: extract_address(text),
    }
}

/// An explicit "Navn:"/"Name:" line shorter than 50 characters wins;
/// otherwise the first of the first three non-empty lines that looks like a
/// name.
pub fn extract_name(text: &str) -> Option<String> {
    if let Some(caps) = NAME_LABEL_RE.captures(text) {
        let line = caps[0].trim();
        let value = caps[1].trim();
        if !value.is_empty() && line.chars().count() < 50 {
            return Some(value.to_string());
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(3)
        .find(|l| looks_like_name(l))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    let all_caps = letters.iter().all(|c| c.is_uppercase());

    line.chars().count() < 40
        && !line.contains('@')
        && !line.contains(':')
        && !line.starts_with(|c: char| c.is_ascii_digit())
        && !letters.is_empty()
        && !all_caps
        && !is_heading_line(line)
        && !TITLE_LINE_RE.is_match(line)
}

pub fn extract_email(text: &str, contact_section: Option<&str>) -> Option<String> {
    contact_section
        .and_then(|section| EMAIL_RE.find(section))
        .or_else(|| EMAIL_RE.find(text))
        .map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| normalize_phone(m.as_str()))
}

/// Keeps digits only. More than 10 digits are cut to the last 10, with the
/// leading surplus (at most 3 digits) kept as a country code when the match
/// started with `+`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let has_plus = raw.trim_start().starts_with('+');

    if digits.len() > 10 {
        let split = digits.len() - 10;
        let last_ten = &digits[split..];
        if has_plus {
            let country_code = &digits[..split.min(3)];
            format!("+{country_code} {last_ten}")
        } else {
            last_ten.to_string()
        }
    } else if has_plus {
        format!("+{digits}")
    } else {
        digits
    }
}

pub fn extract_address(text: &str) -> Option<String> {
    ADDRESS_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_labeled_line() {
        let text = "CURRICULUM VITAE\nNavn: Mette Kirstine Jensen\nEmail: mette@example.dk";
        assert_eq!(extract_name(text).as_deref(), Some("Mette Kirstine Jensen"));
    }

    #[test]
    fn test_labeled_name_too_long_falls_back_to_first_lines() {
        let long = "x".repeat(60);
        let text = format!("Anders And\nName: {long}");
        assert_eq!(extract_name(&text).as_deref(), Some("Anders And"));
    }

    #[test]
    fn test_name_skips_caps_title_and_contact_lines() {
        let text = "CURRICULUM VITAE\nmail@example.dk\nLars Nielsen\nUdvikler";
        assert_eq!(extract_name(text).as_deref(), Some("Lars Nielsen"));
    }

    #[test]
    fn test_name_only_looks_at_first_three_lines() {
        let text = "CV\n2024\nKONTAKT\nLars Nielsen";
        assert_eq!(extract_name(text), None);
    }

    #[test]
    fn test_name_rejects_heading_lines() {
        let text = "Kompetencer\nRust";
        assert_eq!(extract_name(text).as_deref(), Some("Rust"));
    }

    #[test]
    fn test_email_prefers_contact_section() {
        let text = "Reference: boss@oldjob.com\nKontakt\nme@mine.dk";
        let email = extract_email(text, Some("me@mine.dk"));
        assert_eq!(email.as_deref(), Some("me@mine.dk"));
    }

    #[test]
    fn test_email_falls_back_to_whole_text() {
        let email = extract_email("Skriv til jens.hansen+cv@firma.co.uk i dag", None);
        assert_eq!(email.as_deref(), Some("jens.hansen+cv@firma.co.uk"));
    }

    #[test]
    fn test_phone_international_with_separators() {
        assert_eq!(
            extract_phone("Tlf: +45 12 34 56 78").as_deref(),
            Some("+4512345678")
        );
    }

    #[test]
    fn test_phone_danish_pairs() {
        assert_eq!(extract_phone("Telefon 12 34 56 78").as_deref(), Some("12345678"));
    }

    #[test]
    fn test_phone_bare_digits() {
        assert_eq!(extract_phone("Mobil: 22334455").as_deref(), Some("22334455"));
    }

    #[test]
    fn test_phone_prefers_number_over_year_pair() {
        let text = "Jens Hansen\nErfaring\nUdvikler, Trifork 2015 2019\nTlf: 22334455";
        assert_eq!(extract_phone(text).as_deref(), Some("22334455"));
    }

    #[test]
    fn test_labeled_name_limit_counts_whole_line() {
        // 45-character value: the value fits, the "Navn: " line does not.
        let value = "Anne-Marie Kirstine Østergaard-Vestergaard Bo";
        assert_eq!(value.chars().count(), 45);
        let text = format!("Navn: {value}\nPeter Holm");
        assert_eq!(extract_name(&text).as_deref(), Some("Peter Holm"));
    }

    #[test]
    fn test_phone_none_when_absent() {
        assert_eq!(extract_phone("Ingen telefon, kun 2019-2023"), None);
    }

    #[test]
    fn test_normalize_long_international_number() {
        // 13 digits with a leading plus: country code then exactly the last 10.
        assert_eq!(normalize_phone("+123 4567890123"), "+123 4567890123");
    }

    #[test]
    fn test_normalize_eight_digits_unchanged() {
        assert_eq!(normalize_phone("12345678"), "12345678");
    }

    #[test]
    fn test_normalize_long_number_without_plus_keeps_last_ten() {
        assert_eq!(normalize_phone("004512345678"), "4512345678");
    }

    #[test]
    fn test_normalize_long_number_caps_country_code() {
        // 15 digits: only three digits of surplus survive as the country code.
        assert_eq!(normalize_phone("+12345 1234567890"), "+123 1234567890");
    }

    #[test]
    fn test_address_danish() {
        let text = "Adresse\nNørregade 12, 1165 København K\nTlf 12345678";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("Nørregade 12, 1165 København K")
        );
    }

    #[test]
    fn test_address_danish_with_floor() {
        let text = "Adresse: Vesterbrogade 45, 3. th, 1620 København V";
        assert_eq!(
            extract_address(text).as_deref(),
            Some("Vesterbrogade 45, 3. th, 1620 København V")
        );
    }

    #[test]
    fn test_address_us() {
        let text = "1600 Pennsylvania Avenue, Washington, DC 20500";
        assert_eq!(extract_address(text).as_deref(), Some(text));
    }

    #[test]
    fn test_extract_contact_combines_heuristics() {
        let text = "Sofie Larsen\nKontakt\nsofie@example.dk\n+45 20 30 40 50\nNørregade 12, 1165 København K";
        let sections = Sections {
            contact: Some("sofie@example.dk\n+45 20 30 40 50\nNørregade 12, 1165 København K".to_string()),
            ..Default::default()
        };
        let contact = extract_contact(text, &sections);
        assert_eq!(contact.name.as_deref(), Some("Sofie Larsen"));
        assert_eq!(contact.email.as_deref(), Some("sofie@example.dk"));
        assert_eq!(contact.phone.as_deref(), Some("+4520304050"));
        assert_eq!(contact.address.as_deref(), Some("Nørregade 12, 1165 København K"));
    }
}
