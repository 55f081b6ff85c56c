//! Work item model shared by the server and the board client
//!
//! The JSON field names are camelCase because that is the wire format the
//! board endpoints speak; the database columns use snake_case and are mapped
//! through `FromRow` on the struct field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status of a work item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "work_status", rename_all = "kebab-case")]
pub enum WorkStatus {
    Backlog,
    #[default]
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl WorkStatus {
    /// Statuses the deadline sweep leaves alone
    pub fn is_terminal_or_backlog(self) -> bool {
        matches!(
            self,
            WorkStatus::Backlog | WorkStatus::Done | WorkStatus::Cancelled
        )
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkStatus::Backlog => "backlog",
            WorkStatus::Todo => "todo",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Done => "done",
            WorkStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(WorkStatus::Backlog),
            "todo" => Ok(WorkStatus::Todo),
            "in-progress" => Ok(WorkStatus::InProgress),
            "done" => Ok(WorkStatus::Done),
            "cancelled" => Ok(WorkStatus::Cancelled),
            other => Err(format!("Unknown work status: {}", other)),
        }
    }
}

/// Work item entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub owner_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_todo() {
        assert_eq!(WorkStatus::default(), WorkStatus::Todo);
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for s in ["backlog", "todo", "in-progress", "done", "cancelled"] {
            let status: WorkStatus = s.parse().expect("known status should parse");
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("in_progress".parse::<WorkStatus>().is_err());
        assert!("".parse::<WorkStatus>().is_err());
    }

    #[test]
    fn test_status_json_uses_kebab_case() {
        let json = serde_json::to_string(&WorkStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: WorkStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, WorkStatus::Cancelled);
    }

    #[test]
    fn test_work_json_field_names_are_camel_case() {
        let work = Work {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: None,
            status: WorkStatus::Todo,
            end_date: None,
            created_at: Utc::now(),
            owner_id: Uuid::new_v4(),
        };

        let value = serde_json::to_value(&work).unwrap();
        assert!(value.get("endDate").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("ownerId").is_some());
        assert!(value.get("end_date").is_none());
    }

    #[test]
    fn test_sweep_exempt_statuses() {
        assert!(WorkStatus::Backlog.is_terminal_or_backlog());
        assert!(WorkStatus::Done.is_terminal_or_backlog());
        assert!(WorkStatus::Cancelled.is_terminal_or_backlog());
        assert!(!WorkStatus::Todo.is_terminal_or_backlog());
        assert!(!WorkStatus::InProgress.is_terminal_or_backlog());
    }
}
