use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use ideaspark_core::view::ActiveTab;
use ideaspark_infrastructure::IdeaSparkPaths;
use ideaspark_infrastructure::logging::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;

mod app;
mod commands;
mod render;
mod repl;

use app::App;

#[derive(Parser)]
#[command(name = "ideaspark")]
#[command(about = "IdeaSpark - AI-assisted idea factory", long_about = None)]
struct Cli {
    /// Data directory (defaults to $IDEASPARK_HOME or the platform config dir)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with the configured credentials
    Login { username: String, password: String },
    /// Log out
    Logout,
    /// Generate ideas from a prompt
    Boost {
        input: String,
        /// Number of ideas (1-20)
        #[arg(short, long)]
        count: Option<u32>,
    },
    /// Write a requirement document from a prompt
    Prd { input: String },
    /// Write a requirement document from an idea (position, id or id prefix)
    IdeaPrd { idea: String },
    /// Convert a requirement document into a web document
    Web { prd: String },
    /// List a tab of the current session
    List {
        #[arg(value_parser = parse_tab)]
        tab: Option<ActiveTab>,
    },
    /// Show one record
    Show {
        #[arg(value_parser = parse_tab)]
        tab: ActiveTab,
        reference: String,
    },
    /// Show or set the brainstorm mode
    Mode { mode: Option<String> },
    /// Set the session goal
    Goal { text: String },
    /// Toggle an idea's favorite flag
    Favorite { idea: String },
    /// List sessions
    Sessions,
    /// Create a session and make it current
    New {
        title: String,
        #[arg(default_value = "")]
        goal: String,
    },
    /// Switch the current session
    Switch { session: String },
    /// Start the interactive workbench (default)
    Repl,
}

fn parse_tab(value: &str) -> std::result::Result<ActiveTab, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.home {
        Some(home) => IdeaSparkPaths::at(home),
        None => IdeaSparkPaths::resolve()?,
    };
    let guard = init_tracing(&paths.logs_dir(), cli.verbose)?;
    tracing::info!("[main] Starting with home {}", paths.home().display());

    let app = Arc::new(App::bootstrap(&paths).await?);

    let command = cli.command.unwrap_or(Commands::Repl);
    if let Err(e) = run(&app, command).await {
        tracing::error!("[main] {:#}", e);
        eprintln!("{}", format!("Error: {:#}", e).red());
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(app: &Arc<App>, command: Commands) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            if app.login(&username, &password).await? {
                println!("{}", "Logged in.".bright_green());
            } else {
                anyhow::bail!("Invalid credentials");
            }
        }
        Commands::Logout => {
            app.logout().await?;
            println!("{}", "Logged out.".bright_green());
        }
        Commands::Repl => repl::run(Arc::clone(app)).await?,
        command => {
            app.require_login().await?;
            run_authenticated(app, command).await?;
        }
    }
    Ok(())
}

async fn run_authenticated(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Boost { input, count } => {
            commands::boost(app, Some(input), count).await?;
        }
        Commands::Prd { input } => {
            commands::prd(app, Some(input)).await?;
        }
        Commands::IdeaPrd { idea } => {
            commands::idea_to_prd(app, &idea).await?;
        }
        Commands::Web { prd } => {
            commands::web(app, &prd).await?;
        }
        Commands::List { tab } => commands::list(app, tab).await?,
        Commands::Show { tab, reference } => commands::show(app, Some(tab), &reference).await?,
        Commands::Mode { mode } => commands::set_mode(app, mode.as_deref()).await?,
        Commands::Goal { text } => commands::set_goal(app, &text).await?,
        Commands::Favorite { idea } => commands::favorite(app, &idea).await?,
        Commands::Sessions => commands::sessions(app).await?,
        Commands::New { title, goal } => commands::new_session(app, &title, &goal).await?,
        Commands::Switch { session } => commands::switch_session(app, &session).await?,
        Commands::Login { .. } | Commands::Logout | Commands::Repl => {}
    }
    Ok(())
}
