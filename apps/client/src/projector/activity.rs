//! Deduplicated tool-execution activity for the sidebar feed.
//!
//! The pipeline re-emits `tool.execution` events as a tool progresses, so the
//! raw log contains several entries per invocation. The feed shows only the
//! latest entry per `(step, tool, args)` key.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::{ApplicationEvent, EventName, EventStatus};

/// Latest known state of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolExecution {
    pub step: Option<String>,
    pub tool_name: String,
    pub args_summary: String,
    pub status: EventStatus,
    pub message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Tool feed split into in-flight and finished invocations, each sorted by
/// recency (most recent first).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolActivity {
    pub running: Vec<ToolExecution>,
    pub completed: Vec<ToolExecution>,
}

/// Groups `tool.execution` events by `(step, tool_name, args_summary)` and
/// keeps only the latest event per group. Missing timestamps sort as minimal;
/// equal timestamps resolve to the later arrival.
pub fn tool_activity(events: &[ApplicationEvent]) -> ToolActivity {
    let mut latest: HashMap<(String, String, String), ToolExecution> = HashMap::new();

    for event in events {
        if event.event_name != EventName::ToolExecution {
            continue;
        }
        let (Some(tool_name), Some(status)) = (event.tool_name.as_deref(), event.status) else {
            continue;
        };
        let execution = ToolExecution {
            step: event.step.clone(),
            tool_name: tool_name.to_string(),
            args_summary: args_summary(event),
            status,
            message: event.message.clone(),
            created_at: event.created_at,
        };
        let key = (
            execution.step.clone().unwrap_or_default(),
            execution.tool_name.clone(),
            execution.args_summary.clone(),
        );
        // >= so that an equal or missing timestamp lets the later arrival win.
        let replace = match latest.get(&key) {
            Some(existing) => timestamp_of(&execution) >= timestamp_of(existing),
            None => true,
        };
        if replace {
            latest.insert(key, execution);
        }
    }

    let mut activity = ToolActivity::default();
    for execution in latest.into_values() {
        if execution.status == EventStatus::Started {
            activity.running.push(execution);
        } else {
            activity.completed.push(execution);
        }
    }
    activity
        .running
        .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activity
        .completed
        .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activity
}

fn timestamp_of(execution: &ToolExecution) -> DateTime<Utc> {
    execution.created_at.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Compact summary of a tool's arguments, used as part of the dedup key.
/// Prefers an explicit `args_summary` string from the payload, then the raw
/// `args` value serialized, then empty.
fn args_summary(event: &ApplicationEvent) -> String {
    let Some(data) = event.data.as_ref() else {
        return String::new();
    };
    if let Some(summary) = data.get("args_summary").and_then(Value::as_str) {
        return summary.to_string();
    }
    data.get("args").map(Value::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool_event(id: &str, tool: &str, status: &str, extra: serde_json::Value) -> ApplicationEvent {
        let mut event = json!({
            "id": id,
            "event_name": "tool.execution",
            "tool_name": tool,
            "status": status,
        });
        event
            .as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        serde_json::from_value(event).unwrap()
    }

    #[test]
    fn test_started_then_succeeded_collapses_to_completed() {
        let events = vec![
            tool_event(
                "e1",
                "web_search",
                "started",
                json!({"step": "research", "data": {"args": {"query": "Initech culture"}}, "created_at": "2026-03-01T12:00:00Z"}),
            ),
            tool_event(
                "e2",
                "web_search",
                "succeeded",
                json!({"step": "research", "data": {"args": {"query": "Initech culture"}}, "created_at": "2026-03-01T12:00:05Z"}),
            ),
        ];
        let activity = tool_activity(&events);
        assert!(activity.running.is_empty());
        assert_eq!(activity.completed.len(), 1);
        assert_eq!(activity.completed[0].status, EventStatus::Succeeded);
    }

    #[test]
    fn test_distinct_args_are_separate_entries() {
        let events = vec![
            tool_event(
                "e1",
                "web_search",
                "started",
                json!({"step": "research", "data": {"args": {"query": "culture"}}}),
            ),
            tool_event(
                "e2",
                "web_search",
                "started",
                json!({"step": "research", "data": {"args": {"query": "tech stack"}}}),
            ),
        ];
        let activity = tool_activity(&events);
        assert_eq!(activity.running.len(), 2);
    }

    #[test]
    fn test_missing_timestamp_loses_to_timestamped() {
        // An event without created_at sorts as minimal, so the timestamped
        // entry wins even though the bare one arrived later.
        let events = vec![
            tool_event(
                "e1",
                "fetch_page",
                "succeeded",
                json!({"step": "research", "created_at": "2026-03-01T12:00:00Z"}),
            ),
            tool_event("e2", "fetch_page", "started", json!({"step": "research"})),
        ];
        let activity = tool_activity(&events);
        assert!(activity.running.is_empty());
        assert_eq!(activity.completed.len(), 1);
    }

    #[test]
    fn test_equal_timestamps_last_arrival_wins() {
        let at = json!({"step": "research", "created_at": "2026-03-01T12:00:00Z"});
        let events = vec![
            tool_event("e1", "fetch_page", "started", at.clone()),
            tool_event("e2", "fetch_page", "failed", at),
        ];
        let activity = tool_activity(&events);
        assert_eq!(activity.completed.len(), 1);
        assert_eq!(activity.completed[0].status, EventStatus::Failed);
    }

    #[test]
    fn test_completed_sorted_most_recent_first() {
        let events = vec![
            tool_event(
                "e1",
                "fetch_page",
                "succeeded",
                json!({"step": "research", "created_at": "2026-03-01T12:00:00Z"}),
            ),
            tool_event(
                "e2",
                "web_search",
                "succeeded",
                json!({"step": "research", "created_at": "2026-03-01T12:00:10Z"}),
            ),
        ];
        let activity = tool_activity(&events);
        assert_eq!(activity.completed[0].tool_name, "web_search");
        assert_eq!(activity.completed[1].tool_name, "fetch_page");
    }
}
