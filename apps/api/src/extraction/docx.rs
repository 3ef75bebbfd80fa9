//! DOCX decoding: reads `word/document.xml` out of the OOXML zip container
//! and flattens its runs into plain text.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extraction::{DecodeError, FailureKind};

const DOCUMENT_PART: &str = "word/document.xml";

pub trait DocxDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ZipDocxDecoder;

impl DocxDecoder for ZipDocxDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DecodeError::corrupt(format!("Failed to open DOCX container: {e}")))?;

        let mut xml = String::new();
        {
            let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
                zip::result::ZipError::UnsupportedArchive(msg) if msg.contains("Password") => {
                    DecodeError::new(FailureKind::PasswordProtected, msg.to_string())
                }
                other => DecodeError::corrupt(format!("Missing {DOCUMENT_PART}: {other}")),
            })?;
            part.read_to_string(&mut xml)
                .map_err(|e| DecodeError::corrupt(format!("Failed to read {DOCUMENT_PART}: {e}")))?;
        }

        document_xml_to_text(&xml)
    }
}

/// Paragraphs become lines, empty `<w:p/>` included. Inside a `w:r` run,
/// `w:tab` becomes a tab and `w:br`/`w:cr` become line breaks; a `w:tab`
/// under `w:pPr/w:tabs` is a tab-stop definition and emits nothing.
/// Everything outside `w:t` text is ignored.
pub(crate) fn document_xml_to_text(xml: &str) -> Result<String, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut in_run = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" if in_run => out.push('\t'),
                b"w:br" | b"w:cr" if in_run => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text_run {
                    let text = e
                        .unescape()
                        .map_err(|err| DecodeError::corrupt(format!("Bad text run: {err}")))?;
                    out.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DecodeError::corrupt(format!(
                    "Malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    Ok(out.trim_end().to_string())
}
