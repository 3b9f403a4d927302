// Prose intake: generated summary, cover letter, bio, and tips from the external
// text-generation collaborator. The collaborator is opaque and slow; every call is
// bounded by a timeout and a failure degrades the render instead of failing it.

pub mod handlers;
pub mod parser;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::ResumeProfile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProseError {
    #[error("prose source timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("prose source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProseSection {
    Summary,
    CoverLetter,
    LinkedinBio,
    Tips,
}

impl ProseSection {
    pub const ALL: [ProseSection; 4] = [
        ProseSection::Summary,
        ProseSection::CoverLetter,
        ProseSection::LinkedinBio,
        ProseSection::Tips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProseSection::Summary => "summary",
            ProseSection::CoverLetter => "cover_letter",
            ProseSection::LinkedinBio => "linkedin_bio",
            ProseSection::Tips => "tips",
        }
    }
}

/// Generated prose keyed by section. Any section may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProseSections {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub linkedin_bio: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl ProseSections {
    /// Text of a section, `None` when missing or blank. Tips are a list, never text.
    pub fn text(&self, section: ProseSection) -> Option<&str> {
        let value = match section {
            ProseSection::Summary => self.summary.as_deref(),
            ProseSection::CoverLetter => self.cover_letter.as_deref(),
            ProseSection::LinkedinBio => self.linkedin_bio.as_deref(),
            ProseSection::Tips => None,
        };
        value.map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_present(&self, section: ProseSection) -> bool {
        match section {
            ProseSection::Tips => !self.tips.is_empty(),
            _ => self.text(section).is_some(),
        }
    }

    pub fn absent(&self) -> Vec<ProseSection> {
        ProseSection::ALL
            .into_iter()
            .filter(|s| !self.is_present(*s))
            .collect()
    }
}

/// The external text-generation collaborator.
#[async_trait]
pub trait ProseSource: Send + Sync {
    async fn fetch(&self, profile: &ResumeProfile) -> Result<ProseSections, ProseError>;
}

/// Serves fixed sections. The default source: empty unless prose is supplied.
#[derive(Debug, Clone, Default)]
pub struct StaticProse(pub ProseSections);

#[async_trait]
impl ProseSource for StaticProse {
    async fn fetch(&self, _profile: &ResumeProfile) -> Result<ProseSections, ProseError> {
        Ok(self.0.clone())
    }
}

/// What a bounded fetch produced. `error` is set only when the source failed.
#[derive(Debug, Default)]
pub struct ProseOutcome {
    pub sections: ProseSections,
    pub absent: Vec<ProseSection>,
    pub error: Option<ProseError>,
}

impl ProseOutcome {
    pub fn from_sections(sections: ProseSections) -> Self {
        let absent = sections.absent();
        Self {
            sections,
            absent,
            error: None,
        }
    }

    /// Body text a document cannot be rendered without.
    ///
    /// Missing because the source failed → `ExternalDependency`; missing because the
    /// source had nothing → `Content`.
    pub fn require(&mut self, section: ProseSection) -> Result<String, AppError> {
        if let Some(text) = self.sections.text(section) {
            return Ok(text.to_string());
        }
        match self.error.take() {
            Some(e) => Err(AppError::ExternalDependency(e)),
            None => Err(AppError::content(
                section.as_str(),
                format!("no {} text to render", section.as_str().replace('_', " ")),
            )),
        }
    }
}

/// Fetches from `source`, giving up after `timeout`. Never fails: a timeout or
/// source error yields empty sections with every section marked absent.
pub async fn fetch_with_timeout(
    source: &dyn ProseSource,
    profile: &ResumeProfile,
    timeout: Duration,
) -> ProseOutcome {
    let result = match tokio::time::timeout(timeout, source.fetch(profile)).await {
        Ok(result) => result,
        Err(_) => Err(ProseError::Timeout {
            after_ms: timeout.as_millis() as u64,
        }),
    };

    match result {
        Ok(sections) => {
            let outcome = ProseOutcome::from_sections(sections);
            debug!(absent = ?outcome.absent, "Prose fetched");
            outcome
        }
        Err(e) => {
            warn!(error = %e, "Prose source failed, continuing without generated sections");
            ProseOutcome {
                sections: ProseSections::default(),
                absent: ProseSection::ALL.to_vec(),
                error: Some(e),
            }
        }
    }
}
