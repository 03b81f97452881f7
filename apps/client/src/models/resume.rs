//! Resume and cover letter documents as the PUT/POST endpoints accept them.
//!
//! These are full-document shapes: updates replace the whole document, so
//! every field the backend stores is represented here.

use serde::{Deserialize, Serialize};

/// Contact header shared by base and generated resumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A labelled group of skills, e.g. "Languages" → ["Rust", "Go"].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub label: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub date_start: String,
    /// None means a current role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
}

/// Self-evaluation the pipeline attaches to generated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u32>,
}

/// The user's base resume, uploaded or saved through onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResume {
    pub contact: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// A resume tailored by the pipeline for one job application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub contact: ContactInfo,
    pub summary: String,
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationReport>,
}

/// A cover letter tailored by the pipeline for one job application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCoverLetter {
    pub greeting: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    pub closing: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationReport>,
}
