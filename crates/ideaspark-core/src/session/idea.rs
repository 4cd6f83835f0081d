//! Generated idea entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author id stamped on every idea produced by the generation service.
pub const AI_AUTHOR_ID: &str = "ai";
/// Author display name stamped on every idea produced by the generation service.
pub const AI_AUTHOR_NAME: &str = "AI";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single generated creative unit.
///
/// Ideas are created only by the generation coordinator. The one field that
/// changes after creation is `is_favorite`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Open label, e.g. a thinking-hat colour or a free-form theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Idea {
    /// Creates an AI-authored idea with a fresh id and default flags.
    pub fn generated(
        title: impl Into<String>,
        content: impl Into<String>,
        category: Option<String>,
        tags: Vec<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            author_id: AI_AUTHOR_ID.to_string(),
            author_name: AI_AUTHOR_NAME.to_string(),
            tags,
            is_favorite: false,
            priority: Priority::Medium,
            category,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_defaults() {
        let idea = Idea::generated("Title", "Body", Some("green".into()), vec![], 42);
        assert_eq!(idea.author_id, "ai");
        assert_eq!(idea.author_name, "AI");
        assert!(!idea.is_favorite);
        assert_eq!(idea.priority, Priority::Medium);
        assert_eq!(idea.created_at, 42);
        assert!(Uuid::parse_str(&idea.id).is_ok());
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{
            "id": "a1", "title": "t", "content": "c",
            "authorId": "ai", "authorName": "AI", "createdAt": 1
        }"#;
        let idea: Idea = serde_json::from_str(json).unwrap();
        assert!(idea.tags.is_empty());
        assert_eq!(idea.priority, Priority::Medium);
        assert!(idea.category.is_none());
    }
}
