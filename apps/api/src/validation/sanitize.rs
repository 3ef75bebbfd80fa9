use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node};

/// Elements whose text content must never reach the form.
const DROPPED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "title",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "li", "tr", "ul", "ol", "table", "section", "article", "header", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Tag-shaped text that survives entity decoding, e.g. `&lt;script&gt;`.
static RESIDUAL_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").unwrap());

/// Reduces rich text to plain text: drops executable and styling elements
/// with their content, removes all other tags, decodes entities, and
/// normalizes whitespace. Paragraph breaks (blank lines) are kept.
pub fn sanitize_html(input: &str) -> String {
    if !input.contains('<') && !input.contains('&') {
        return normalize_whitespace(input);
    }

    let fragment = Html::parse_fragment(input);
    let mut text = String::with_capacity(input.len());

    for node in fragment.tree.root().descendants() {
        match node.value() {
            Node::Text(t) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|e| DROPPED_ELEMENTS.contains(&e.name()))
                });
                if !hidden {
                    text.push_str(t);
                }
            }
            Node::Element(e) if BLOCK_ELEMENTS.contains(&e.name()) => text.push('\n'),
            _ => {}
        }
    }

    let stripped = RESIDUAL_TAG_RE.replace_all(&text, "");
    normalize_whitespace(&stripped)
}

/// Collapses runs of whitespace inside each line, drops control characters,
/// and squeezes consecutive blank lines into one.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines() {
        let collapsed = line
            .split_whitespace()
            .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if collapsed.is_empty() {
            pending_blank = true;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if pending_blank { "\n\n" } else { "\n" });
        }
        out.push_str(&collapsed);
        pending_blank = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_only_normalized() {
        assert_eq!(sanitize_html("  Rust,   Go \n\n\n SQL  "), "Rust, Go\n\nSQL");
    }

    #[test]
    fn test_script_content_is_dropped() {
        let out = sanitize_html("Rust<script>alert('x')</script> og Go");
        assert_eq!(out, "Rust og Go");
    }

    #[test]
    fn test_tags_removed_and_entities_decoded() {
        let out = sanitize_html("<b>R&amp;D</b> <i>ingeniør</i>");
        assert_eq!(out, "R&D ingeniør");
    }

    #[test]
    fn test_block_elements_become_lines() {
        let out = sanitize_html("<ul><li>Rust</li><li>Go</li></ul>");
        assert_eq!(out, "Rust\nGo");
    }

    #[test]
    fn test_encoded_markup_is_neutralized() {
        let out = sanitize_html("&lt;script&gt;alert(1)&lt;/script&gt;Kotlin");
        assert!(!out.contains("<script>"));
        assert!(out.contains("Kotlin"));
    }

    #[test]
    fn test_style_and_iframe_dropped() {
        let out = sanitize_html("<style>p{color:red}</style><iframe src=x>frame</iframe>Tekst");
        assert_eq!(out, "Tekst");
    }

    #[test]
    fn test_comparison_operators_survive() {
        assert_eq!(sanitize_html("latency < 5 ms & uptime > 99%"), "latency < 5 ms & uptime > 99%");
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(sanitize_html("Jens\u{0007} Hansen"), "Jens Hansen");
    }
}
