use crate::segmentation::SegmenterConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub segmentation: SegmenterConfig,
    pub translation: TranslationConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct TranslationConfig {
    /// Recognition language, e.g. "nl-NL"
    pub source_language: String,
    /// Translation target, e.g. "en"
    pub target_language: String,
    /// Marker appended by the demo translator
    pub suffix: String,
    pub timeout_ms: u64,
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.segmentation
            .validate()
            .context("Invalid [segmentation] section")?;

        Ok(cfg)
    }
}
