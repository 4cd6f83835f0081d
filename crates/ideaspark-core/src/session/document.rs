//! Requirement documents and their web-specific derivatives.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `idea_id` of a requirement document written from raw input rather than
/// from a stored idea.
pub const DIRECT_IDEA_ID: &str = "direct";

/// Title prefix of every generated requirement document.
pub const PRD_TITLE_PREFIX: &str = "PRD: ";
/// Title prefix of every generated web document.
pub const WEB_DOC_TITLE_PREFIX: &str = "Web: ";

/// Maximum number of characters of the first input line used as a PRD title.
pub const PRD_TITLE_MAX_CHARS: usize = 30;

/// A structured product requirement document (PRD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDoc {
    pub id: String,
    /// Source idea id, or [`DIRECT_IDEA_ID`].
    pub idea_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
}

impl RequirementDoc {
    pub fn new(
        idea_id: impl Into<String>,
        subject: &str,
        content: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            idea_id: idea_id.into(),
            title: format!("{PRD_TITLE_PREFIX}{subject}"),
            content: content.into(),
            created_at,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.idea_id == DIRECT_IDEA_ID
    }

    /// The title without the generated prefix.
    pub fn subject(&self) -> &str {
        self.title
            .strip_prefix(PRD_TITLE_PREFIX)
            .unwrap_or(&self.title)
    }
}

/// A technical document specialising a [`RequirementDoc`] for a web build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebDoc {
    pub id: String,
    pub prd_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
}

impl WebDoc {
    /// Derives a web document from `source`, linking it by id.
    pub fn derived_from(source: &RequirementDoc, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prd_id: source.id.clone(),
            title: format!("{WEB_DOC_TITLE_PREFIX}{}", source.subject()),
            content: content.into(),
            created_at,
        }
    }
}

/// Derives a PRD subject from free text: the first line, cut to
/// [`PRD_TITLE_MAX_CHARS`] characters.
pub fn derive_title(input: &str) -> String {
    input
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
        .chars()
        .take(PRD_TITLE_MAX_CHARS)
        .collect()
}
