//! Pipeline events — the append-only fact log carried inside every snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator for pipeline events emitted by the backend.
///
/// Unknown discriminators deserialize to [`EventName::Unknown`] so that new
/// backend event kinds never break an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "pipeline.update")]
    PipelineUpdate,
    #[serde(rename = "pipeline.step")]
    PipelineStep,
    #[serde(rename = "research.category")]
    ResearchCategory,
    #[serde(rename = "tool.execution")]
    ToolExecution,
    #[serde(rename = "artifact.generated")]
    ArtifactGenerated,
    #[serde(rename = "pipeline.completed")]
    PipelineCompleted,
    #[serde(rename = "pipeline.failed")]
    PipelineFailed,
    #[serde(other)]
    Unknown,
}

/// Tri-state progress marker attached to step, category, and tool events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Started,
    Succeeded,
    Failed,
}

/// One immutable fact emitted by the backend pipeline.
///
/// Events arrive embedded in snapshots, ordered by arrival. `created_at` is
/// only a tie-break for "latest" computations and is never assumed monotonic
/// across network hops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationEvent {
    pub id: String,
    pub event_name: EventName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    /// Pipeline-stage identifier. Free-form on the wire; see [`PIPELINE_STEPS`]
    /// for the set the backend is known to emit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Present only for `research.category` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Loose payload bag; use [`ApplicationEvent::step_payload`] for the
    /// fields this client actually reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Step identifiers the backend is known to emit for `pipeline.step` events.
pub const PIPELINE_STEPS: [&str; 8] = [
    "company_discovery",
    "research",
    "resume_generation",
    "resume_drafting",
    "resume_evaluation",
    "cover_letter_generation",
    "cover_letter_drafting",
    "cover_letter_evaluation",
];

/// Typed view over the `data` bag of step and artifact events.
///
/// Only the fields the dashboard reads; everything else stays in the raw
/// [`Value`] for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepPayload {
    pub iteration: Option<u32>,
    pub evaluation_grade: Option<String>,
    pub evaluation_summary: Option<String>,
}

impl ApplicationEvent {
    /// Parses the event's `data` bag into the fields the client understands.
    /// Unknown or malformed bags yield the empty payload.
    pub fn step_payload(&self) -> StepPayload {
        self.data
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
            .unwrap_or_default()
    }

    /// True if this event's `step` contains the given stage substring.
    pub fn step_contains(&self, needle: &str) -> bool {
        self.step.as_deref().is_some_and(|s| s.contains(needle))
    }

    /// Best-effort human-readable message out of the `error` bag.
    pub fn error_message(&self) -> Option<&str> {
        match self.error.as_ref()? {
            Value::String(s) => Some(s.as_str()),
            other => other.get("message").and_then(Value::as_str),
        }
    }
}
