use anyhow::{anyhow, Context, Result};

use crate::segmentation::AnchorStrategy;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
    /// Serve sample data instead of extracting uploads.
    pub demo_mode: bool,
    pub section_anchor: AnchorStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            demo_mode: match lookup("DEMO_MODE") {
                Some(v) => parse_flag(&v).context("DEMO_MODE must be true or false")?,
                None => false,
            },
            section_anchor: match lookup("SECTION_ANCHOR") {
                Some(v) => v.parse().map_err(|e: String| anyhow!(e))?,
                None => AnchorStrategy::default(),
            },
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("unrecognized flag value '{other}'")),
    }
}

#[cfg(test)]
impl Config {
    /// Defaults, as if no variable were set.
    pub fn for_tests() -> Self {
        Self::from_lookup(|_| None).unwrap()
    }
}
