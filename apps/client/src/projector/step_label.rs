//! Human-readable "current step" label for the status header.

use crate::models::{ApplicationEvent, EventName, EventStatus, GenerationStatus, JobApplicationSnapshot};

/// Scans the event log from the most recent event backwards and returns the
/// first informative label. Events are the fine-grained signal but may lag
/// the coarse status, so an empty or unlabelable log falls back to
/// [`coarse_label`].
pub fn current_step_label(snapshot: &JobApplicationSnapshot) -> String {
    if snapshot.events.is_empty() {
        return "Starting…".to_string();
    }
    snapshot
        .events
        .iter()
        .rev()
        .find_map(label_for)
        .unwrap_or_else(|| coarse_label(snapshot.resume_generation_status))
}

fn label_for(event: &ApplicationEvent) -> Option<String> {
    match event.event_name {
        EventName::PipelineFailed => Some("Failed".to_string()),
        EventName::ResearchCategory => {
            let category = event.category_name.as_deref()?;
            match event.status {
                Some(EventStatus::Succeeded) => Some(format!("Research: {category} done")),
                Some(EventStatus::Started) => Some(format!("Research: {category}")),
                _ => None,
            }
        }
        EventName::PipelineStep => step_label(event),
        _ => None,
    }
}

fn step_label(event: &ApplicationEvent) -> Option<String> {
    let step = event.step.as_deref()?;
    let stage = if step.contains("company_discovery") {
        "Company Discovery"
    } else if step.contains("research") {
        "Company Research"
    } else if step.contains("resume_draft") {
        "Resume Draft"
    } else if step.contains("cover_letter") {
        "Cover Letter"
    } else {
        return None;
    };
    if event.status == Some(EventStatus::Succeeded) {
        Some(format!("{stage} Completed"))
    } else {
        Some(stage.to_string())
    }
}

fn coarse_label(status: GenerationStatus) -> String {
    match status {
        GenerationStatus::Started => "Starting…",
        GenerationStatus::ProcessingCompanyProfile => "Researching Company",
        GenerationStatus::ProcessingResumeGeneration => "Generating Resume",
        GenerationStatus::ProcessingCoverLetter => "Writing Cover Letter",
        GenerationStatus::Completed => "Completed",
        GenerationStatus::Failed => "Failed",
    }
    .to_string()
}
