//! Command handlers shared by the one-shot subcommands and the REPL.

use crate::app::App;
use crate::render;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use ideaspark_core::generation::GenerationOutcome;
use ideaspark_core::session::{BrainstormMode, Session};
use ideaspark_core::view::ActiveTab;

/// Resolves a record reference: a 1-based position, a full id or a unique id prefix.
pub fn resolve_ref(ids: &[&str], token: &str) -> Option<String> {
    let token = token.trim();
    if let Ok(position) = token.parse::<usize>() {
        if (1..=ids.len()).contains(&position) {
            return Some(ids[position - 1].to_string());
        }
    }
    if let Some(id) = ids.iter().find(|id| **id == token) {
        return Some(id.to_string());
    }
    let mut matches = ids.iter().filter(|id| !token.is_empty() && id.starts_with(token));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Some(id.to_string()),
        _ => None,
    }
}

fn ids_for(session: &Session, tab: ActiveTab) -> Vec<&str> {
    match tab {
        ActiveTab::Ideas => session.ideas.iter().map(|i| i.id.as_str()).collect(),
        ActiveTab::Prds => session.prds.iter().map(|p| p.id.as_str()).collect(),
        ActiveTab::Web => session.web_prds.iter().map(|w| w.id.as_str()).collect(),
        ActiveTab::Raw => session.raw_requirements.iter().map(|r| r.id.as_str()).collect(),
    }
}

fn resolve_in(session: &Session, tab: ActiveTab, token: &str) -> Result<String> {
    resolve_ref(&ids_for(session, tab), token)
        .with_context(|| format!("No {} matches '{}'", tab, token))
}

pub async fn boost(app: &App, input: Option<String>, count: Option<u32>) -> Result<GenerationOutcome> {
    let coordinator = app.coordinator()?;
    {
        let mut view = app.view.write().await;
        if let Some(input) = input {
            view.composer.input = input;
        }
        if let Some(count) = count {
            view.composer.set_idea_count(count);
        }
    }
    println!("{}", "Generating ideas...".bright_black());
    let outcome = coordinator.boost_ideas().await;
    render::print_outcome(&outcome);
    if outcome.is_completed() {
        render::print_tab(&app.workbench.current_session().await, ActiveTab::Ideas);
    }
    Ok(outcome)
}

pub async fn prd(app: &App, input: Option<String>) -> Result<GenerationOutcome> {
    let coordinator = app.coordinator()?;
    if let Some(input) = input {
        app.view.write().await.composer.input = input;
    }
    println!("{}", "Writing requirement document...".bright_black());
    let outcome = coordinator.generate_prd().await;
    render::print_outcome(&outcome);
    if outcome.is_completed() {
        show_latest_prd(app).await;
    }
    Ok(outcome)
}

/// Writes a requirement document from the idea `token` refers to.
pub async fn idea_to_prd(app: &App, token: &str) -> Result<GenerationOutcome> {
    let coordinator = app.coordinator()?;
    let session = app.workbench.current_session().await;
    let idea_id = resolve_in(&session, ActiveTab::Ideas, token)?;

    println!("{}", "Writing requirement document from idea...".bright_black());
    let outcome = coordinator.generate_prd_from_idea(&idea_id).await;
    render::print_outcome(&outcome);
    if outcome.is_completed() {
        show_latest_prd(app).await;
    }
    Ok(outcome)
}

/// Converts the requirement document `token` refers to into a web document.
pub async fn web(app: &App, token: &str) -> Result<GenerationOutcome> {
    let coordinator = app.coordinator()?;
    let session = app.workbench.current_session().await;
    let prd_id = resolve_in(&session, ActiveTab::Prds, token)?;

    println!("{}", "Converting to web document...".bright_black());
    let outcome = coordinator.convert_to_web(&prd_id).await;
    render::print_outcome(&outcome);
    if outcome.is_completed() {
        let session = app.workbench.current_session().await;
        if let Some(web) = session.web_prds.first() {
            render::print_document(&web.title, &web.content);
        }
    }
    Ok(outcome)
}

async fn show_latest_prd(app: &App) {
    let session = app.workbench.current_session().await;
    if let Some(prd) = session.prds.first() {
        render::print_document(&prd.title, &prd.content);
    }
}

pub async fn list(app: &App, tab: Option<ActiveTab>) -> Result<()> {
    let tab = match tab {
        Some(tab) => {
            app.view.write().await.active_tab = tab;
            tab
        }
        None => app.view.read().await.active_tab,
    };
    let session = app.workbench.current_session().await;
    render::print_session_header(&session);
    render::print_tab(&session, tab);
    Ok(())
}

/// Opens the detail view of a record in `tab` (the active tab when `None`).
pub async fn show(app: &App, tab: Option<ActiveTab>, token: &str) -> Result<()> {
    let tab = match tab {
        Some(tab) => tab,
        None => app.view.read().await.active_tab,
    };
    let session = app.workbench.current_session().await;
    let id = resolve_in(&session, tab, token)?;

    let mut view = app.view.write().await;
    match tab {
        ActiveTab::Ideas => {
            view.select_idea(id);
            if let Some(idea) = view.selected_idea(&session) {
                render::print_idea(idea);
            }
        }
        ActiveTab::Prds => {
            view.select_prd(id);
            if let Some(prd) = view.selected_prd(&session) {
                render::print_document(&prd.title, &prd.content);
            }
        }
        ActiveTab::Web => {
            view.select_web_prd(id);
            if let Some(web) = view.selected_web_prd(&session) {
                render::print_document(&web.title, &web.content);
            }
        }
        ActiveTab::Raw => {
            if let Some(entry) = session.raw_requirements.iter().find(|r| r.id == id) {
                println!("{}", entry.content);
            }
        }
    }
    Ok(())
}

pub async fn set_mode(app: &App, mode: Option<&str>) -> Result<()> {
    let Some(mode) = mode else {
        render::print_modes(app.workbench.current_session().await.current_mode);
        return Ok(());
    };
    let mode: BrainstormMode = mode.parse().map_err(anyhow::Error::msg)?;
    app.workbench.set_mode(mode).await?;
    println!("{} {}", "Mode:".bright_black(), mode.display_name().green());
    Ok(())
}

pub async fn set_goal(app: &App, goal: &str) -> Result<()> {
    if goal.trim().is_empty() {
        bail!("Goal must not be empty");
    }
    app.workbench.set_goal(goal.trim()).await?;
    println!("{} {}", "Goal:".bright_black(), goal.trim().green());
    Ok(())
}

pub async fn favorite(app: &App, token: &str) -> Result<()> {
    let session = app.workbench.current_session().await;
    let idea_id = resolve_in(&session, ActiveTab::Ideas, token)?;
    let session = app.workbench.toggle_favorite(&idea_id).await?;
    if let Some(idea) = session.find_idea(&idea_id) {
        let state = if idea.is_favorite { "Starred" } else { "Unstarred" };
        println!("{} {}", state.yellow(), idea.title);
    }
    Ok(())
}

pub async fn sessions(app: &App) -> Result<()> {
    let current = app.workbench.current_session().await;
    render::print_sessions(&app.workbench.list_sessions().await, &current.id);
    Ok(())
}

pub async fn new_session(app: &App, title: &str, goal: &str) -> Result<()> {
    let session = app.workbench.create_session(title, goal).await?;
    println!("{} {}", "Created session".green(), session.title.bold());
    Ok(())
}

pub async fn switch_session(app: &App, token: &str) -> Result<()> {
    let sessions = app.workbench.list_sessions().await;
    let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
    let id = resolve_ref(&ids, token).with_context(|| format!("No session matches '{}'", token))?;
    let session = app.workbench.switch_session(&id).await?;
    render::print_session_header(&session);
    Ok(())
}
