use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::similarity::MatcherOptions;

/// Central configuration loaded from environment variables.
///
/// The .env file, if present, is loaded at startup via dotenvy. Every value
/// has a default, so an empty environment is a valid configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pairs scoring at or above this percentage are flagged as likely
    /// duplicates (DUPDETECT_FLAG_THRESHOLD, default 80).
    pub flag_threshold: f64,
    /// Popular-character heuristic in the sequence matcher
    /// (DUPDETECT_AUTOJUNK, default true).
    pub autojunk: bool,
    /// Where uploaded files are staged while a batch is scored
    /// (DUPDETECT_UPLOAD_DIR, default ./uploads).
    pub upload_dir: PathBuf,
    /// Request body limit for uploads in bytes (DUPDETECT_MAX_UPLOAD_MB).
    pub max_upload_bytes: usize,
    /// How long a session's report stays downloadable
    /// (DUPDETECT_SESSION_TTL_MINS, default 60).
    pub session_ttl_mins: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flag_threshold: 80.0,
            autojunk: true,
            upload_dir: PathBuf::from("./uploads"),
            max_upload_bytes: 50 * 1024 * 1024,
            session_ttl_mins: 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let flag_threshold = match env::var("DUPDETECT_FLAG_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("DUPDETECT_FLAG_THRESHOLD is not a number: {raw}"))?,
            Err(_) => defaults.flag_threshold,
        };

        let autojunk = match env::var("DUPDETECT_AUTOJUNK") {
            Ok(raw) => parse_bool(&raw)
                .with_context(|| format!("DUPDETECT_AUTOJUNK must be true or false, got {raw}"))?,
            Err(_) => defaults.autojunk,
        };

        let max_upload_bytes = match env::var("DUPDETECT_MAX_UPLOAD_MB") {
            Ok(raw) => {
                let mb = raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("DUPDETECT_MAX_UPLOAD_MB is not a whole number: {raw}"))?;
                megabytes_to_bytes(mb)?
            }
            Err(_) => defaults.max_upload_bytes,
        };

        let session_ttl_mins = match env::var("DUPDETECT_SESSION_TTL_MINS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("DUPDETECT_SESSION_TTL_MINS is not a whole number: {raw}"))?,
            Err(_) => defaults.session_ttl_mins,
        };

        let config = Self {
            flag_threshold,
            autojunk,
            upload_dir: env::var("DUPDETECT_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes,
            session_ttl_mins,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be meaningful.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.flag_threshold) {
            anyhow::bail!(
                "DUPDETECT_FLAG_THRESHOLD must be between 0 and 100, got {}",
                self.flag_threshold
            );
        }
        if self.session_ttl_mins <= 0 {
            anyhow::bail!("DUPDETECT_SESSION_TTL_MINS must be positive");
        }
        Ok(())
    }

    pub fn matcher_options(&self) -> MatcherOptions {
        MatcherOptions {
            autojunk: self.autojunk,
        }
    }
}

fn megabytes_to_bytes(mb: usize) -> Result<usize> {
    mb.checked_mul(1024 * 1024)
        .with_context(|| format!("DUPDETECT_MAX_UPLOAD_MB is too large: {mb}"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
