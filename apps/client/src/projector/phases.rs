//! Per-phase status derivation for the pipeline sidebar.

use serde::Serialize;

use crate::models::{EventStatus, GenerationStatus, JobApplicationSnapshot};
use crate::projector::{Phase, PhaseStatus};

/// One phase with its derived status, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseState {
    pub phase: Phase,
    pub status: PhaseStatus,
}

/// Maps the coarse status directly to the phase in progress. Events are
/// not consulted here; the coarse status is the authoritative signal.
/// `failed` yields no focused phase; the sidebar shows the failure per phase.
pub fn current_phase(status: GenerationStatus) -> Option<Phase> {
    match status {
        GenerationStatus::Started | GenerationStatus::ProcessingCompanyProfile => {
            Some(Phase::CompanyResearch)
        }
        GenerationStatus::ProcessingResumeGeneration => Some(Phase::ResumeGeneration),
        GenerationStatus::ProcessingCoverLetter | GenerationStatus::Completed => {
            Some(Phase::CoverLetter)
        }
        GenerationStatus::Failed => None,
    }
}

/// Derives the status of all three phases from the snapshot.
pub fn phase_states(snapshot: &JobApplicationSnapshot) -> [PhaseState; 3] {
    Phase::ORDER.map(|phase| PhaseState {
        phase,
        status: phase_status(snapshot, phase),
    })
}

fn phase_status(snapshot: &JobApplicationSnapshot, phase: Phase) -> PhaseStatus {
    // A failure attributed to this phase sticks for the whole rendering
    // session, even if a later event for the same step succeeds.
    if has_failed_event(snapshot, phase) {
        return PhaseStatus::Failed;
    }
    if snapshot.resume_generation_status == processing_status(phase) {
        return PhaseStatus::Active;
    }
    if artifact_present(snapshot, phase) || coarse_passed(snapshot.resume_generation_status, phase)
    {
        return PhaseStatus::Completed;
    }
    PhaseStatus::Pending
}

fn has_failed_event(snapshot: &JobApplicationSnapshot, phase: Phase) -> bool {
    snapshot.events.iter().any(|event| {
        event.status == Some(EventStatus::Failed)
            && phase
                .step_needles()
                .iter()
                .any(|needle| event.step_contains(needle))
    })
}

fn processing_status(phase: Phase) -> GenerationStatus {
    match phase {
        Phase::CompanyResearch => GenerationStatus::ProcessingCompanyProfile,
        Phase::ResumeGeneration => GenerationStatus::ProcessingResumeGeneration,
        Phase::CoverLetter => GenerationStatus::ProcessingCoverLetter,
    }
}

/// Whether the phase's terminal artifact is present on the snapshot.
fn artifact_present(snapshot: &JobApplicationSnapshot, phase: Phase) -> bool {
    match phase {
        Phase::CompanyResearch => snapshot.company_profile.is_some(),
        Phase::ResumeGeneration => snapshot.generated_resume.is_some(),
        Phase::CoverLetter => snapshot.generated_cover_letter.is_some(),
    }
}

/// Whether the coarse status has moved past the given phase. `failed` counts
/// as past nothing; completion then falls back to artifact presence.
fn coarse_passed(status: GenerationStatus, phase: Phase) -> bool {
    match status {
        GenerationStatus::Started
        | GenerationStatus::ProcessingCompanyProfile
        | GenerationStatus::Failed => false,
        GenerationStatus::ProcessingResumeGeneration => phase == Phase::CompanyResearch,
        GenerationStatus::ProcessingCoverLetter => {
            matches!(phase, Phase::CompanyResearch | Phase::ResumeGeneration)
        }
        GenerationStatus::Completed => true,
    }
}
