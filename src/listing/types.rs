// src/listing/types.rs
use serde::{Deserialize, Serialize};

/// One entry of the `/search` feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub date: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result of a single refresh that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The view now shows this many cards.
    Rendered(usize),
    /// A newer refresh was already applied; this response was dropped.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_feed_with_extra_fields() {
        let raw = r#"[{
            "title": "Product Designer",
            "company": "Atelier Nord",
            "location": "Strasbourg",
            "description": "UI and UX for B2B tools",
            "date": "2024-03-01",
            "url": "https://jobs.example/1",
            "source": "APEC",
            "salary": "n/a"
        }]"#;

        let records: Vec<JobRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company, "Atelier Nord");
        assert_eq!(records[0].source.as_deref(), Some("APEC"));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let raw = r#"[{"title": "Designer", "company": "X"}]"#;
        assert!(serde_json::from_str::<Vec<JobRecord>>(raw).is_err());
    }

    #[test]
    fn test_object_instead_of_array_is_rejected() {
        let raw = r#"{"jobs": []}"#;
        assert!(serde_json::from_str::<Vec<JobRecord>>(raw).is_err());
    }
}
