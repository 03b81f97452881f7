//! Status projector — pure derivations over the latest snapshot.
//!
//! Nothing in this module holds state or performs I/O: every function is a
//! plain read over `(snapshot, events)` and is recomputed fresh whenever the
//! store changes. Phase status is never persisted, so it cannot diverge from
//! the snapshot it was derived from.

pub mod activity;
pub mod phases;
pub mod research;
pub mod step_label;

pub use activity::{tool_activity, ToolActivity, ToolExecution};
pub use phases::{current_phase, phase_states, PhaseState};
pub use research::{research_progress, CategoryProgress, CategoryStatus};
pub use step_label::current_step_label;

use serde::{Deserialize, Serialize};

/// The three top-level pipeline stages as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    CompanyResearch,
    ResumeGeneration,
    CoverLetter,
}

impl Phase {
    /// Fixed display order; auto-advance walks this left to right.
    pub const ORDER: [Phase; 3] = [
        Phase::CompanyResearch,
        Phase::ResumeGeneration,
        Phase::CoverLetter,
    ];

    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::CompanyResearch => Some(Phase::ResumeGeneration),
            Phase::ResumeGeneration => Some(Phase::CoverLetter),
            Phase::CoverLetter => None,
        }
    }

    /// Step substrings that attribute a `pipeline.step` event to this phase.
    pub(crate) fn step_needles(self) -> &'static [&'static str] {
        match self {
            Phase::CompanyResearch => &["company_discovery", "research"],
            Phase::ResumeGeneration => &["resume"],
            Phase::CoverLetter => &["cover_letter"],
        }
    }
}

/// Derived status of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    Active,
    Completed,
    Failed,
}
