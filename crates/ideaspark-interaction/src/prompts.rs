//! Prompt templates.

use ideaspark_core::error::{IdeaSparkError, Result};
use ideaspark_core::generation::IdeaRequest;
use minijinja::{Environment, context};

const IDEA_SYSTEM: &str = "\
You are a top-tier creative consultant.
Goal: {{ goal }}
Mode: {{ mode_name }} ({{ mode_description }})
Quantity: generate {{ count }} ideas.

Rules:
1. Ideas must be practical and distinctive.
2. Return JSON.";

const IDEA_PROMPT: &str = "Generate {{ count }} ideas based on the context. Context: {{ context }}";

const PRD_SYSTEM: &str = "\
You are a senior product manager who writes rigorous requirement documents. \
Return plain-text Markdown.";

const PRD_PROMPT: &str = "\
Write a professional product requirement document (PRD) for the following idea:
Title: {{ title }}
Description: {{ content }}

Include: product overview, target users, core features, technical feasibility, risk assessment.
Use Markdown headings (#, ##, ###).";

const WEB_SYSTEM: &str = "\
You are a senior web architect and product manager focused on web experience \
and implementation detail. Return plain-text Markdown.";

const WEB_PROMPT: &str = "\
Convert the following general requirement document (PRD) into a technical requirement document \
specifically for **building it as a website**.

Original content:
{{ source }}

Include these web-specific sections:
1. Web feature list, down to individual pages.
2. UI/UX guidelines: visual style and web interaction patterns.
3. Frontend technology choices: frameworks, libraries, responsive strategy.
4. Performance and SEO recommendations.
5. Browser compatibility requirements.

Use Markdown headings (#, ##, ###).";

/// A rendered system instruction and user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Compiled prompt templates for every gateway call.
pub struct PromptLibrary {
    env: Environment<'static>,
}

impl PromptLibrary {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("idea_system", IDEA_SYSTEM),
            ("idea_prompt", IDEA_PROMPT),
            ("prd_prompt", PRD_PROMPT),
            ("web_prompt", WEB_PROMPT),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    pub fn ideas(&self, request: &IdeaRequest) -> Result<RenderedPrompt> {
        let ctx = context! {
            goal => request.goal,
            mode_name => request.mode.display_name(),
            mode_description => request.mode.description(),
            count => request.count,
            context => request.context,
        };
        Ok(RenderedPrompt {
            system: self.render("idea_system", &ctx)?,
            user: self.render("idea_prompt", &ctx)?,
        })
    }

    pub fn requirement_doc(&self, title: &str, content: &str) -> Result<RenderedPrompt> {
        Ok(RenderedPrompt {
            system: PRD_SYSTEM.to_string(),
            user: self.render("prd_prompt", &context! { title, content })?,
        })
    }

    pub fn web_doc(&self, source: &str) -> Result<RenderedPrompt> {
        Ok(RenderedPrompt {
            system: WEB_SYSTEM.to_string(),
            user: self.render("web_prompt", &context! { source })?,
        })
    }

    fn render(&self, name: &str, ctx: &minijinja::Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|t| t.render(ctx))
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> IdeaSparkError {
    IdeaSparkError::internal(format!("Prompt template error: {err}"))
}
