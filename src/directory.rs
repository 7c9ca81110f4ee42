//! Static hospital and protocol content
//!
//! The portal ships with embedded content. Deployments can point the
//! directory configuration at replacement JSON files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::DirectoryConfig;
use crate::error::EmtPortalError;
use crate::models::{Hospital, Protocol};

const EMBEDDED_HOSPITALS: &str = include_str!("../data/hospitals.json");
const EMBEDDED_PROTOCOLS: &str = include_str!("../data/protocols.json");

/// Hospitals and protocol reference cards served by the portal
#[derive(Debug, Clone, Default)]
pub struct Directory {
    hospitals: Vec<Hospital>,
    protocols: Vec<Protocol>,
}

impl Directory {
    #[must_use]
    pub fn new(hospitals: Vec<Hospital>, protocols: Vec<Protocol>) -> Self {
        Self {
            hospitals,
            protocols,
        }
    }

    /// Load content, preferring configured files over the embedded defaults
    pub fn load(config: &DirectoryConfig) -> Result<Self, EmtPortalError> {
        let hospitals = match &config.hospitals_path {
            Some(path) => read_file(path)?,
            None => parse("embedded hospitals", EMBEDDED_HOSPITALS)?,
        };
        let protocols = match &config.protocols_path {
            Some(path) => read_file(path)?,
            None => parse("embedded protocols", EMBEDDED_PROTOCOLS)?,
        };

        info!(
            "Loaded {} hospitals and {} protocols",
            hospitals.len(),
            protocols.len()
        );
        Ok(Self::new(hospitals, protocols))
    }

    #[must_use]
    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    #[must_use]
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Protocols in `category`, or all of them when no category is given
    #[must_use]
    pub fn protocols_in(&self, category: Option<&str>) -> Vec<Protocol> {
        self.protocols
            .iter()
            .filter(|p| category.is_none_or(|c| p.in_category(c)))
            .cloned()
            .collect()
    }
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, EmtPortalError> {
    let content = fs::read_to_string(path).map_err(|e| {
        EmtPortalError::directory(format!("Failed to read {}: {e}", path.display()))
    })?;
    parse(&path.display().to_string(), &content)
}

fn parse<T: DeserializeOwned>(label: &str, content: &str) -> Result<Vec<T>, EmtPortalError> {
    serde_json::from_str(content)
        .map_err(|e| EmtPortalError::directory(format!("Failed to parse {label}: {e}")))
}
