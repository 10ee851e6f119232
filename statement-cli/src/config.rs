use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statement_finance::ReportConfig;
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_statement_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatSection,
    #[serde(default)]
    pub upload: UploadSection,
    #[serde(default)]
    pub reminder: ReminderSection,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSection {
    /// Pause before the assistant answers; 0 answers immediately
    pub thinking_delay_ms: u64,
    /// Append a daily transcript under ~/.statement/chat/
    pub transcript: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSection {
    pub processing_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderSection {
    pub default_email: String,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 600,
            transcript: true,
        }
    }
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            processing_delay_ms: 1500,
        }
    }
}

impl Default for ReminderSection {
    fn default() -> Self {
        Self {
            default_email: statement_core::reminders::DEFAULT_RECIPIENT.to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_statement_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.chat.thinking_delay_ms, 600);
        assert_eq!(cfg.upload.processing_delay_ms, 1500);
        assert_eq!(cfg.reminder.default_email, "you@example.com");
        assert_eq!(cfg.report, ReportConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            "[chat]\nthinking_delay_ms = 0\ntranscript = false\n\n[report]\nsummary = true\nanalysis = false\ntransactions = true\n",
        )
        .unwrap();
        assert_eq!(cfg.chat.thinking_delay_ms, 0);
        assert!(!cfg.chat.transcript);
        assert!(!cfg.report.analysis);
        assert_eq!(cfg.upload.processing_delay_ms, 1500);
    }

    #[test]
    fn test_defaults_roundtrip_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back = parse_config(&s).unwrap();
        assert_eq!(back.chat.thinking_delay_ms, 600);
        assert!(back.report.transactions);
    }
}
