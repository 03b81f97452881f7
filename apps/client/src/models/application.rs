//! Job application snapshots — the full server-owned state of one application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::ApplicationEvent;
use crate::models::resume::{GeneratedCoverLetter, GeneratedResume};

/// Coarse pipeline state for one application. This is the authoritative
/// signal for "which phase are we in"; events are the fine-grained one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Started,
    ProcessingCompanyProfile,
    ProcessingResumeGeneration,
    ProcessingCoverLetter,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Company discovery output — the first research stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyDiscovery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One category the research stage plans to investigate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

/// The ordered research plan produced after discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchPlan {
    #[serde(default)]
    pub categories: Vec<PlannedCategory>,
}

/// Finished research text for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResearch {
    pub category: String,
    pub content: String,
}

/// Structured research output, populated incrementally as stages complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<CompanyDiscovery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_plan: Option<ResearchPlan>,
    #[serde(default)]
    pub research: Vec<CategoryResearch>,
}

/// The full current state of one job application as delivered by the backend.
///
/// Each stream message carries the entire snapshot, never a delta, so the
/// client replaces its copy wholesale and never mutates it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationSnapshot {
    pub id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    pub resume_generation_status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_profile: Option<CompanyProfile>,
    /// Present only once resume generation succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_resume: Option<GeneratedResume>,
    /// Present only once cover letter generation succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_cover_letter: Option<GeneratedCoverLetter>,
    /// Full event log for this application, ordered by arrival.
    #[serde(default)]
    pub events: Vec<ApplicationEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Slim row returned by the list and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationSummary {
    pub id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub resume_generation_status: GenerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
