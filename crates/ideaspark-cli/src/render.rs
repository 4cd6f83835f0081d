//! Terminal rendering of sessions and documents.

use colored::Colorize;
use ideaspark_core::document::{DocumentBlock, parse_blocks};
use ideaspark_core::generation::{GenerationOutcome, RejectReason};
use ideaspark_core::session::{BrainstormMode, Idea, RawRequirementKind, Session};
use ideaspark_core::view::ActiveTab;

const ID_PREVIEW: usize = 8;

/// One line per record of `tab`, numbered from 1.
pub fn tab_lines(session: &Session, tab: ActiveTab) -> Vec<String> {
    match tab {
        ActiveTab::Ideas => session.ideas.iter().map(idea_line).enumerate().map(number).collect(),
        ActiveTab::Prds => session
            .prds
            .iter()
            .map(|p| {
                let derived = session.web_docs_for(&p.id).count();
                format!("{}  {}  ({} web)", short_id(&p.id), p.title, derived)
            })
            .enumerate()
            .map(number)
            .collect(),
        ActiveTab::Web => session
            .web_prds
            .iter()
            .map(|w| format!("{}  {}", short_id(&w.id), w.title))
            .enumerate()
            .map(number)
            .collect(),
        ActiveTab::Raw => session
            .raw_requirements
            .iter()
            .map(|r| {
                let kind = match r.kind {
                    RawRequirementKind::AiBoost => "AI_BOOST",
                    RawRequirementKind::PrdGen => "PRD_GEN",
                };
                format!("{:<8}  {}", kind, first_line(&r.content))
            })
            .enumerate()
            .map(number)
            .collect(),
    }
}

pub fn print_tab(session: &Session, tab: ActiveTab) {
    println!(
        "{} {} {}",
        session.title.bright_magenta().bold(),
        "/".bright_black(),
        tab.as_str().bright_cyan()
    );
    let lines = tab_lines(session, tab);
    if lines.is_empty() {
        println!("{}", "  (empty)".bright_black());
    }
    for line in lines {
        println!("  {}", line);
    }
}

pub fn print_session_header(session: &Session) {
    let mode = session.current_mode;
    println!(
        "{}  {}",
        session.title.bright_magenta().bold(),
        session.goal.bright_black()
    );
    println!(
        "  {} {} ({})  ideas {}  prds {}  web {}  raw {}",
        mode.icon(),
        mode.display_name(),
        mode.description(),
        session.ideas.len(),
        session.prds.len(),
        session.web_prds.len(),
        session.raw_requirements.len()
    );
}

pub fn print_idea(idea: &Idea) {
    let star = if idea.is_favorite { "★" } else { "☆" };
    println!("{} {}", star.yellow(), idea.title.bold());
    if let Some(category) = &idea.category {
        println!("  {} {}", "category:".bright_black(), category);
    }
    if !idea.tags.is_empty() {
        println!("  {} {}", "tags:".bright_black(), idea.tags.join(", "));
    }
    println!("  {} {:?}  {} {}", "priority:".bright_black(), idea.priority, "id:".bright_black(), idea.id);
    println!();
    for line in idea.content.lines() {
        println!("  {}", line);
    }
}

/// Prints a generated document with its headings highlighted.
pub fn print_document(title: &str, content: &str) {
    println!("{}", title.bright_magenta().bold());
    println!();
    for block in parse_blocks(content) {
        match block {
            DocumentBlock::Heading { level: 1, text } => println!("{}", text.bold().underline()),
            DocumentBlock::Heading { level: 2, text } => println!("{}", text.bright_cyan().bold()),
            DocumentBlock::Heading { text, .. } => println!("{}", text.cyan()),
            DocumentBlock::Paragraph { text } => println!("{}", text),
            DocumentBlock::Blank => println!(),
        }
    }
}

pub fn print_modes(current: BrainstormMode) {
    for mode in BrainstormMode::ALL {
        let marker = if mode == current { "*" } else { " " };
        println!(
            "{} {} {:<10} {:<13} {}",
            marker.green(),
            mode.icon(),
            mode.as_str(),
            mode.display_name(),
            mode.description().bright_black()
        );
    }
}

pub fn print_sessions(sessions: &[Session], current_id: &str) {
    for (index, session) in sessions.iter().enumerate() {
        let marker = if session.id == current_id { "*" } else { " " };
        println!(
            "{} [{}] {}  {}  {}",
            marker.green(),
            index + 1,
            short_id(&session.id),
            session.title.bold(),
            session.goal.bright_black()
        );
    }
}

pub fn print_outcome(outcome: &GenerationOutcome) {
    match outcome {
        GenerationOutcome::Completed { created } => {
            println!("{}", format!("Created {} record(s).", created).green())
        }
        GenerationOutcome::Failed => println!(
            "{}",
            "Generation failed. See the log for details; your input was kept.".red()
        ),
        GenerationOutcome::Rejected(RejectReason::Busy) => {
            println!("{}", "A generation is already running.".yellow())
        }
        GenerationOutcome::Rejected(RejectReason::EmptyInput) => {
            println!("{}", "Nothing to send: the input is empty.".yellow())
        }
        GenerationOutcome::Rejected(RejectReason::NotFound) => {
            println!("{}", "No such record in the current session.".yellow())
        }
    }
}

fn idea_line(idea: &Idea) -> String {
    let star = if idea.is_favorite { "★ " } else { "" };
    match &idea.category {
        Some(category) => format!("{}  {}{}  [{}]", short_id(&idea.id), star, idea.title, category),
        None => format!("{}  {}{}", short_id(&idea.id), star, idea.title),
    }
}

fn number((index, line): (usize, String)) -> String {
    format!("[{}] {}", index + 1, line)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(ID_PREVIEW) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
