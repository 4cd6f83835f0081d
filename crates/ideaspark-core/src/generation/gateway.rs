//! Remote generation contract.

use crate::error::Result;
use crate::session::BrainstormMode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters of one idea-generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRequest {
    pub goal: String,
    pub mode: BrainstormMode,
    pub count: u32,
    /// The user's raw prompt.
    pub context: String,
}

/// One idea as returned by the generation service, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl IdeaDraft {
    /// A draft without a title or content cannot become an idea.
    pub fn is_usable(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Stateless remote functions that produce ideas and documents.
///
/// Prompt construction, response schema and model selection are the
/// implementation's business. Documents use a markdown-like convention:
/// lines prefixed `#`, `##`, `###` are headings, everything else is a paragraph.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generates up to `request.count` ideas.
    ///
    /// Implementations return an empty vector when the response cannot be
    /// parsed, and an error only when the call itself failed.
    async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<IdeaDraft>>;

    /// Writes a requirement document for the given subject and description.
    async fn generate_requirement_doc(&self, title: &str, content: &str) -> Result<String>;

    /// Rewrites a requirement document as a web implementation document.
    async fn generate_web_doc(&self, source_content: &str) -> Result<String>;
}
