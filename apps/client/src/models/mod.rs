pub mod account;
pub mod application;
pub mod event;
pub mod resume;

pub use account::{AuthSession, UserProfile};
pub use application::{
    CategoryResearch, CompanyDiscovery, CompanyProfile, GenerationStatus, JobApplicationSnapshot,
    JobApplicationSummary, PlannedCategory, ResearchPlan,
};
pub use event::{ApplicationEvent, EventName, EventStatus, StepPayload};
pub use resume::{
    ContactInfo, EducationEntry, EvaluationReport, ExperienceEntry, GeneratedCoverLetter,
    GeneratedResume, SkillGroup, UserResume,
};
