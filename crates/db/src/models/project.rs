//! Project record model and DTOs.

use folio_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// One project entry in the document.
///
/// Field names are camelCase on disk and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: RecordId,
    pub description: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub hosted_link: Option<String>,
    /// Public path of the uploaded image (`/uploads/<filename>`).
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
///
/// `hashtags` is a comma-separated string and `comments` a JSON-encoded
/// array. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub description: Option<String>,
    pub hashtags: Option<String>,
    pub comments: Option<String>,
    pub github_link: Option<String>,
    pub hosted_link: Option<String>,
}

/// DTO for updating an existing project. All fields are optional; absent or
/// empty fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub description: Option<String>,
    pub hashtags: Option<String>,
    pub comments: Option<String>,
    pub github_link: Option<String>,
    pub hosted_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_camel_case_with_nulls() {
        let now = chrono::Utc::now();
        let record = ProjectRecord {
            id: "abc".into(),
            description: "demo".into(),
            hashtags: vec![],
            comments: vec![],
            github_link: None,
            hosted_link: Some("https://example.com".into()),
            image: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["hostedLink"], "https://example.com");
        assert!(json["githubLink"].is_null());
        assert!(json["image"].is_null());
        assert!(json["createdAt"].is_string());
        assert!(json.get("github_link").is_none());
    }

    #[test]
    fn record_reads_millisecond_iso_timestamps() {
        let json = r#"{
            "id": "1700000000000",
            "description": "legacy",
            "hashtags": ["a"],
            "comments": [],
            "githubLink": null,
            "hostedLink": null,
            "image": null,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1700000000000");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn create_dto_accepts_camel_case_fields() {
        let dto: CreateProject =
            serde_json::from_str(r#"{"description":"x","githubLink":"https://gh"}"#).unwrap();
        assert_eq!(dto.description.as_deref(), Some("x"));
        assert_eq!(dto.github_link.as_deref(), Some("https://gh"));
        assert!(dto.hashtags.is_none());
    }
}
