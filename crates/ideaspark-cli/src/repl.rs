//! Interactive workbench.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::app::App;
use crate::commands;
use crate::render;
use ideaspark_core::view::ActiveTab;

const COMMANDS: &[(&str, &str)] = &[
    ("/boost", "[text]        generate ideas from the input"),
    ("/prd", "[text]          write a requirement document from the input"),
    ("/idea-prd", "<idea>     write a requirement document from an idea"),
    ("/web", "<prd>           convert a requirement document to a web document"),
    ("/tab", "[name]          list the active tab (ideas, prds, web, raw)"),
    ("/open", "<ref>          show a record of the active tab"),
    ("/close", "              close the detail view"),
    ("/fav", "<idea>          toggle an idea's favorite flag"),
    ("/mode", "[mode]         show or set the brainstorm mode"),
    ("/count", "<n>           ideas per boost"),
    ("/goal", "<text>         set the session goal"),
    ("/sessions", "           list sessions"),
    ("/new", "<title> | <goal>  create a session"),
    ("/switch", "<session>    switch session"),
    ("/logout", "             log out and leave"),
    ("/help", "               show this help"),
    ("/quit", "               leave"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text goes to the composer.
    Input(String),
    Boost(Option<String>),
    Prd(Option<String>),
    IdeaPrd(String),
    Web(String),
    Tab(Option<ActiveTab>),
    Open(String),
    Close,
    Favorite(String),
    Mode(Option<String>),
    Count(u32),
    Goal(String),
    Sessions,
    New { title: String, goal: String },
    Switch(String),
    Logout,
    Help,
    Quit,
    Invalid(String),
}

fn non_empty(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

/// Parses one REPL line. Lines not starting with `/` are composer input.
pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if !line.starts_with('/') {
        return ReplCommand::Input(line.to_string());
    }
    let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim();

    let required = |build: fn(String) -> ReplCommand| match non_empty(arg) {
        Some(arg) => build(arg),
        None => ReplCommand::Invalid(format!("{} needs an argument", name)),
    };

    match name {
        "/boost" => ReplCommand::Boost(non_empty(arg)),
        "/prd" => ReplCommand::Prd(non_empty(arg)),
        "/idea-prd" => required(ReplCommand::IdeaPrd),
        "/web" => required(ReplCommand::Web),
        "/tab" => match non_empty(arg) {
            None => ReplCommand::Tab(None),
            Some(tab) => match tab.parse::<ActiveTab>() {
                Ok(tab) => ReplCommand::Tab(Some(tab)),
                Err(e) => ReplCommand::Invalid(e),
            },
        },
        "/open" => required(ReplCommand::Open),
        "/close" => ReplCommand::Close,
        "/fav" => required(ReplCommand::Favorite),
        "/mode" => ReplCommand::Mode(non_empty(arg)),
        "/count" => match arg.parse::<u32>() {
            Ok(count) => ReplCommand::Count(count),
            Err(_) => ReplCommand::Invalid(format!("Not a number: '{}'", arg)),
        },
        "/goal" => required(ReplCommand::Goal),
        "/sessions" => ReplCommand::Sessions,
        "/new" => {
            let (title, goal) = arg.split_once('|').unwrap_or((arg, ""));
            match non_empty(title) {
                Some(title) => ReplCommand::New {
                    title,
                    goal: goal.trim().to_string(),
                },
                None => ReplCommand::Invalid("/new needs a title".to_string()),
            }
        }
        "/switch" => required(ReplCommand::Switch),
        "/logout" => ReplCommand::Logout,
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        other => ReplCommand::Invalid(format!("Unknown command: {}", other)),
    }
}

/// Completion, hints and highlighting for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_help() {
    for (name, usage) in COMMANDS {
        println!("  {} {}", name.bright_cyan(), usage.bright_black());
    }
    println!(
        "  {}",
        "Any other text becomes the composer input.".bright_black()
    );
}

/// Asks for credentials until they are accepted. Returns `false` if the user leaves.
async fn prompt_login(app: &App, rl: &mut Editor<CliHelper, DefaultHistory>) -> Result<bool> {
    loop {
        let username = match rl.readline("username: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        let password = match rl.readline("password: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        };

        if app.login(username.trim(), password.trim()).await? {
            println!("{}", "Logged in.".bright_green());
            return Ok(true);
        }
        println!("{}", "Invalid credentials.".red());
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Runs a generation workflow in the background so the prompt stays usable.
///
/// A second workflow started while one is pending is rejected by the
/// coordinator and reported like any other outcome.
fn spawn_workflow(app: &Arc<App>, command: ReplCommand) {
    let app = Arc::clone(app);
    tokio::spawn(async move {
        let result = match command {
            ReplCommand::Boost(text) => commands::boost(&app, text, None).await,
            ReplCommand::Prd(text) => commands::prd(&app, text).await,
            ReplCommand::IdeaPrd(token) => commands::idea_to_prd(&app, &token).await,
            ReplCommand::Web(token) => commands::web(&app, &token).await,
            _ => return,
        };
        if let Err(e) = result {
            eprintln!("{}", format!("Error: {:#}", e).red());
        }
    });
}

/// Blocks until no workflow is in flight, so its result is persisted.
async fn wait_for_flight(app: &App) {
    let Ok(coordinator) = app.coordinator() else {
        return;
    };
    if coordinator.is_busy() {
        println!("{}", "Waiting for the running generation...".bright_black());
    }
    while coordinator.is_busy() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

async fn dispatch(app: &Arc<App>, command: ReplCommand) -> Result<Flow> {
    match command {
        ReplCommand::Input(text) => {
            app.view.write().await.composer.input = text;
            println!("{}", "Input set. Run /boost or /prd.".bright_black());
        }
        command @ (ReplCommand::Boost(_)
        | ReplCommand::Prd(_)
        | ReplCommand::IdeaPrd(_)
        | ReplCommand::Web(_)) => {
            app.coordinator()?;
            spawn_workflow(app, command);
        }
        ReplCommand::Tab(tab) => commands::list(app, tab).await?,
        ReplCommand::Open(token) => commands::show(app, None, &token).await?,
        ReplCommand::Close => app.view.write().await.close_details(),
        ReplCommand::Favorite(token) => commands::favorite(app, &token).await?,
        ReplCommand::Mode(mode) => commands::set_mode(app, mode.as_deref()).await?,
        ReplCommand::Count(count) => {
            let count = app.view.write().await.composer.set_idea_count(count);
            println!("{} {}", "Ideas per boost:".bright_black(), count);
        }
        ReplCommand::Goal(goal) => commands::set_goal(app, &goal).await?,
        ReplCommand::Sessions => commands::sessions(app).await?,
        ReplCommand::New { title, goal } => commands::new_session(app, &title, &goal).await?,
        ReplCommand::Switch(token) => commands::switch_session(app, &token).await?,
        ReplCommand::Logout => {
            wait_for_flight(app).await;
            app.logout().await?;
            println!("{}", "Logged out.".bright_green());
            return Ok(Flow::Exit);
        }
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => {
            wait_for_flight(app).await;
            println!("{}", "Goodbye!".bright_green());
            return Ok(Flow::Exit);
        }
        ReplCommand::Invalid(message) => println!("{}", message.yellow()),
    }
    Ok(Flow::Continue)
}

pub async fn run(app: Arc<App>) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== IdeaSpark ===".bright_magenta().bold());

    if !app.is_authenticated().await && !prompt_login(&app, &mut rl).await? {
        return Ok(());
    }

    render::print_session_header(&app.workbench.current_session().await);
    println!(
        "{}",
        "Type a prompt, then /boost or /prd. /help lists every command.".bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match dispatch(&app, parse_command(&line)).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => break,
                    Err(e) => eprintln!("{}", format!("Error: {:#}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                wait_for_flight(&app).await;
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
