use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::resume::TailoredResume;

pub const UNTITLED: &str = "Untitled";

/// One past generation. Only `job_title` and `company` are editable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default = "Uuid::new_v4", deserialize_with = "lenient_id")]
    pub id: Uuid,
    #[serde(default = "Utc::now", deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default = "untitled")]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume: TailoredResume,
}

impl HistoryEntry {
    pub fn new(
        resume: TailoredResume,
        job_description: String,
        job_title: Option<String>,
        company: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            job_title: normalize_title(job_title.as_deref().unwrap_or_default()),
            company: company.unwrap_or_default().trim().to_string(),
            job_description,
            resume,
        }
    }
}

/// Blank titles display as "Untitled".
pub fn normalize_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        untitled()
    } else {
        title.to_string()
    }
}

fn untitled() -> String {
    UNTITLED.to_string()
}

/// Older history files carry free-form ids; anything unparseable gets a fresh one.
fn lenient_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Uuid::parse_str(s.trim()).unwrap_or_else(|_| Uuid::new_v4()),
        _ => Uuid::new_v4(),
    })
}

/// RFC 3339, or the naive `%Y-%m-%d %H:%M:%S` form read as UTC. Anything else is now.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s).unwrap_or_else(Utc::now),
        _ => Utc::now(),
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_defaults() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"job_description": "Rust role"}"#).unwrap();
        assert_eq!(entry.job_title, "Untitled");
        assert_eq!(entry.company, "");
        assert_eq!(entry.job_description, "Rust role");
        assert!(entry.resume.summary.is_empty());
    }

    #[test]
    fn test_naive_timestamp_and_free_form_id_are_accepted() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"id": "20240501123000", "timestamp": "2024-05-01 12:30:00", "job_title": "Data Analyst"}"#,
        )
        .unwrap();
        assert_eq!(entry.job_title, "Data Analyst");
        assert_eq!(
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-05-01 12:30:00"
        );
    }

    #[test]
    fn test_rfc3339_timestamp_round_trips_and_garbage_defaults() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"id": "5b7c1f7e-3f7a-4a55-9d2a-2f0d3c9e8b11", "timestamp": "2024-05-01T12:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.id.to_string(), "5b7c1f7e-3f7a-4a55-9d2a-2f0d3c9e8b11");
        assert_eq!(entry.timestamp.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let garbage: HistoryEntry =
            serde_json::from_str(r#"{"id": 7, "timestamp": "last tuesday"}"#).unwrap();
        assert!(garbage.timestamp > entry.timestamp);
    }

    #[test]
    fn test_new_normalizes_blank_title() {
        let entry = HistoryEntry::new(
            TailoredResume::default(),
            "jd".to_string(),
            Some("   ".to_string()),
            Some(" Acme ".to_string()),
        );
        assert_eq!(entry.job_title, "Untitled");
        assert_eq!(entry.company, "Acme");
    }
}
