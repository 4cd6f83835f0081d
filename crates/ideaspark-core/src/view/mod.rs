//! Selection and navigation state of the presentation surface.
//!
//! Nothing here is persisted. Selections hold ids only; resolvers look the
//! id up in the current session so a stale selection resolves to `None`.

use crate::generation::{DEFAULT_IDEA_COUNT, clamp_idea_count};
use crate::session::{Idea, RequirementDoc, Session, WebDoc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which collection of the current session is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Ideas,
    Prds,
    Web,
    Raw,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 4] = [
        ActiveTab::Ideas,
        ActiveTab::Prds,
        ActiveTab::Web,
        ActiveTab::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveTab::Ideas => "ideas",
            ActiveTab::Prds => "prds",
            ActiveTab::Web => "web",
            ActiveTab::Raw => "raw",
        }
    }
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == needle)
            .ok_or_else(|| format!("Unknown tab '{s}'. Expected one of: ideas, prds, web, raw"))
    }
}

/// The text input shared by the boost and PRD workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composer {
    pub input: String,
    idea_count: u32,
}

impl Default for Composer {
    fn default() -> Self {
        Self::with_idea_count(DEFAULT_IDEA_COUNT)
    }
}

impl Composer {
    pub fn with_idea_count(count: u32) -> Self {
        Self {
            input: String::new(),
            idea_count: clamp_idea_count(count),
        }
    }

    pub fn idea_count(&self) -> u32 {
        self.idea_count
    }

    /// Stores the count clamped to the allowed range and returns the stored value.
    pub fn set_idea_count(&mut self, count: u32) -> u32 {
        self.idea_count = clamp_idea_count(count);
        self.idea_count
    }

    /// Input with surrounding whitespace removed, or `None` when blank.
    pub fn trimmed_input(&self) -> Option<&str> {
        let trimmed = self.input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub active_tab: ActiveTab,
    selected_idea_id: Option<String>,
    selected_prd_id: Option<String>,
    selected_web_prd_id: Option<String>,
    pub composer: Composer,
}

impl ViewState {
    pub fn new(idea_count: u32) -> Self {
        Self {
            composer: Composer::with_idea_count(idea_count),
            ..Self::default()
        }
    }

    // At most one detail view is open, so each select clears the other two.

    pub fn select_idea(&mut self, idea_id: impl Into<String>) {
        self.close_details();
        self.selected_idea_id = Some(idea_id.into());
    }

    pub fn select_prd(&mut self, prd_id: impl Into<String>) {
        self.close_details();
        self.selected_prd_id = Some(prd_id.into());
    }

    pub fn select_web_prd(&mut self, web_prd_id: impl Into<String>) {
        self.close_details();
        self.selected_web_prd_id = Some(web_prd_id.into());
    }

    pub fn close_details(&mut self) {
        self.selected_idea_id = None;
        self.selected_prd_id = None;
        self.selected_web_prd_id = None;
    }

    pub fn selected_idea_id(&self) -> Option<&str> {
        self.selected_idea_id.as_deref()
    }

    pub fn selected_prd_id(&self) -> Option<&str> {
        self.selected_prd_id.as_deref()
    }

    pub fn selected_web_prd_id(&self) -> Option<&str> {
        self.selected_web_prd_id.as_deref()
    }

    pub fn selected_idea<'a>(&self, session: &'a Session) -> Option<&'a Idea> {
        session.find_idea(self.selected_idea_id.as_deref()?)
    }

    pub fn selected_prd<'a>(&self, session: &'a Session) -> Option<&'a RequirementDoc> {
        session.find_prd(self.selected_prd_id.as_deref()?)
    }

    pub fn selected_web_prd<'a>(&self, session: &'a Session) -> Option<&'a WebDoc> {
        session.find_web_prd(self.selected_web_prd_id.as_deref()?)
    }
}
