//! Per-category research status for the research progress panel.

use serde::Serialize;

use crate::models::{EventName, EventStatus, JobApplicationSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Pending,
    Started,
    Succeeded,
    Failed,
}

impl From<EventStatus> for CategoryStatus {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Started => Self::Started,
            EventStatus::Succeeded => Self::Succeeded,
            EventStatus::Failed => Self::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub name: String,
    pub status: CategoryStatus,
}

/// Derives per-category status: every category named in the research plan
/// starts `pending`, then `research.category` events are folded in arrival
/// order. Categories the backend reports outside the plan are appended in
/// the order they first appear.
pub fn research_progress(snapshot: &JobApplicationSnapshot) -> Vec<CategoryProgress> {
    let mut progress: Vec<CategoryProgress> = snapshot
        .company_profile
        .as_ref()
        .and_then(|profile| profile.research_plan.as_ref())
        .map(|plan| {
            plan.categories
                .iter()
                .map(|category| CategoryProgress {
                    name: category.name.clone(),
                    status: CategoryStatus::Pending,
                })
                .collect()
        })
        .unwrap_or_default();

    for event in &snapshot.events {
        if event.event_name != EventName::ResearchCategory {
            continue;
        }
        let (Some(name), Some(status)) = (event.category_name.as_deref(), event.status) else {
            continue;
        };
        match progress.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.status = latest_status_wins(entry.status, status),
            None => progress.push(CategoryProgress {
                name: name.to_string(),
                status: status.into(),
            }),
        }
    }

    progress
}

/// Last-write-wins with no monotonicity: a duplicate or out-of-order
/// `started` after `succeeded` regresses the category. Swap this for a
/// ranked transition table (`pending → started → {succeeded|failed}`) to
/// enforce forward-only transitions.
fn latest_status_wins(_current: CategoryStatus, incoming: EventStatus) -> CategoryStatus {
    incoming.into()
}
