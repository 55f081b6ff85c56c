//! Work item request payloads
//!
//! The update payload distinguishes an absent `endDate` (leave the column
//! untouched) from an explicit `null` (clear the deadline), so partial
//! updates such as the sweep's status change never touch other fields.

use chrono::{DateTime, NaiveDate, Utc};
use common::model::WorkStatus;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Request payload for creating a work item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Request payload for partially updating a work item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
}

/// Validated payload for inserting a work item
#[derive(Debug, Clone)]
pub struct NewWork {
    pub title: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub end_date: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
}

/// Validated field changes applied by the work repository
#[derive(Debug, Clone, Default)]
pub struct WorkChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
    /// `None` leaves the deadline untouched, `Some(None)` clears it
    pub end_date: Option<Option<DateTime<Utc>>>,
}

/// Parse a deadline supplied as text
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (interpreted as
/// UTC midnight), the two formats the board clients send.
pub fn parse_end_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc())
        .map_err(|_| format!("Invalid endDate: {}", s))
}

/// Deserialize a field so that a present `null` becomes `Some(None)` while
/// an absent field stays `None` (via `#[serde(default)]`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_absent_end_date_is_untouched() {
        let req: UpdateWorkRequest = serde_json::from_str(r#"{"status":"backlog"}"#).unwrap();
        assert_eq!(req.status.as_deref(), Some("backlog"));
        assert!(req.end_date.is_none());
        assert!(req.title.is_none());
    }

    #[test]
    fn test_null_end_date_clears() {
        let req: UpdateWorkRequest = serde_json::from_str(r#"{"endDate":null}"#).unwrap();
        assert_eq!(req.end_date, Some(None));
    }

    #[test]
    fn test_textual_end_date_is_kept() {
        let req: UpdateWorkRequest =
            serde_json::from_str(r#"{"endDate":"2026-08-01T12:00:00Z"}"#).unwrap();
        assert_eq!(req.end_date, Some(Some("2026-08-01T12:00:00Z".to_string())));
    }

    #[test]
    fn test_parse_end_date_rfc3339() {
        let dt = parse_end_date("2026-08-01T12:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_end_date_plain_date() {
        let dt = parse_end_date("2026-08-01").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.to_rfc3339(), "2026-08-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_end_date_rejects_garbage() {
        assert!(parse_end_date("next tuesday").is_err());
        assert!(parse_end_date("").is_err());
    }

    #[test]
    fn test_create_request_with_missing_fields() {
        let req: CreateWorkRequest = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Buy milk"));
        assert!(req.status.is_none());
        assert!(req.description.is_none());
        assert!(req.end_date.is_none());
    }
}
