//! Teach & Tell CLI
//!
//! Thin wrapper around teachtell-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Show configuration and session state
//! teachtell info
//!
//! # Sign in with a participant code
//! teachtell login ABC123
//!
//! # Check the stored session against the backend
//! teachtell session
//!
//! # List course weeks, show one, or prebuild content.json
//! teachtell course list
//! teachtell course show week1
//! teachtell course build
//!
//! # Track progress
//! teachtell progress show
//! teachtell progress toggle week1 week1-grammar
//! teachtell progress notes week1 "Tim lied about the time"
//!
//! # Ask the tutor about a word
//! teachtell explain alibi --text "He had an alibi."
//!
//! # Play Tell interactively
//! teachtell play
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use teachtell_core::config::{resolve_api_base, ApiBaseOptions};
use teachtell_core::content::{build_content, load_course};
use teachtell_core::game::{roster, ChatLog, ChatUpdate, GameSession, SESSION_EXPIRED_NOTICE};
use teachtell_core::highlight::{message_id, HighlightManager, HighlightOutcome};
use teachtell_core::markdown::to_plain_text;
use teachtell_core::{
    ApiClient, ClientConfig, DisplayMessage, Displayed, Explainer, SessionManager, Storage,
    TeachProgress, Week,
};
use tokio::io::AsyncBufReadExt;

/// Teach & Tell - language learning course and detective game
#[derive(Parser)]
#[command(name = "teachtell")]
#[command(version = "0.1.0")]
#[command(about = "Teach & Tell - language learning course and detective game")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: <platform data dir>/teachtell)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Backend base URL (default: $TEACHTELL_API_URL or http://localhost:8000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the week markdown files
    #[arg(long, global = true, default_value = "content")]
    content_dir: PathBuf,

    /// Resolve the backend as a production (non-local) client
    #[arg(long, global = true)]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configuration and stored session
    Info,

    /// Sign in with a participant code
    Login {
        /// Participant code (case-insensitive)
        code: String,
    },

    /// Validate the stored session against the backend
    Session,

    /// Forget the stored session
    Logout,

    /// Teach course content
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },

    /// Teach progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },

    /// Word highlights
    Highlight {
        #[command(subcommand)]
        action: HighlightAction,
    },

    /// Ask the tutor to explain a word or phrase
    Explain {
        /// Word or phrase
        word: String,
        /// Text the word appeared in
        #[arg(short, long, default_value = "")]
        text: String,
    },

    /// Tell game commands
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Play Tell interactively
    Play,
}

#[derive(Subcommand)]
enum CourseAction {
    /// List weeks
    List,
    /// Show a week's sections
    Show {
        /// Week ID (e.g. week1)
        week_id: String,
    },
    /// Parse every week and write data/content.json
    Build,
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Show task completion per week
    Show,
    /// Mark a task done (or not done with --undo)
    Toggle {
        week_id: String,
        task_id: String,
        /// Mark as not completed
        #[arg(long)]
        undo: bool,
    },
    /// Replace a week's notes
    Notes { week_id: String, text: String },
    /// Set the current week
    Select { week_id: String },
}

#[derive(Subcommand)]
enum HighlightAction {
    /// Highlight a phrase in a message
    Add {
        /// Full message text
        message: String,
        /// Phrase to highlight
        phrase: String,
    },
    /// List stored highlights for a message
    List {
        /// Full message text
        message: String,
    },
    /// Remove a highlighted phrase
    Remove { message: String, phrase: String },
}

#[derive(Subcommand)]
enum GameAction {
    /// Load the game and print its opening messages
    Start,
    /// Send an action (e.g. talk_tim, examine_clue_2)
    Action { action: String },
    /// Send a chat message
    Say { text: String },
    /// List characters, case materials and menu actions
    Roster,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (<platform data dir>/teachtell)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("teachtell")
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut options = ApiBaseOptions::from_env();
    if let Some(url) = &cli.api_url {
        options.override_url = Some(url.clone());
    }
    let base = resolve_api_base(&options, !cli.production)
        .ok_or_else(|| anyhow::anyhow!("No backend URL configured"))?;
    Ok(ClientConfig::new(&base, &cli.content_dir)?)
}

async fn load_weeks(config: &ClientConfig) -> Vec<Week> {
    load_course(&config.content_dir, &config.weeks, &config.course).await
}

fn print_displayed(messages: &[Displayed]) {
    for message in messages {
        match message {
            Displayed::Chat(m) => print_chat(m),
            Displayed::Clue { content, .. } => {
                println!("{}", message.title().unwrap_or_default());
                println!("{}", content.trim());
                println!();
            }
        }
    }
}

fn open_progress(storage: Storage, weeks: Vec<Week>) -> Result<TeachProgress> {
    let mut progress = TeachProgress::new(storage);
    progress.initialize(weeks)?;
    Ok(progress)
}

fn print_chat(message: &DisplayMessage) {
    println!("[{}] {}", message.sender, message.content.trim());
    for button in &message.buttons {
        println!("    ({}) {}", button.action, button.text);
    }
    println!();
}

/// Print what a batch changed in the chat log.
fn print_update(log: &ChatLog, update: &ChatUpdate) {
    if update.removed_intro {
        println!("(story introduction replaced)");
    }
    let messages = log.messages();
    for message in &messages[messages.len().saturating_sub(update.added)..] {
        print_chat(message);
    }
    if update.clue_opened {
        if let Some(clue) = log.clue() {
            println!("{}", clue.title);
            println!("{}", clue.content.trim());
            println!();
        }
    }
    if update.unlocked {
        println!("(chat unlocked: you can now type messages)");
    }
}

async fn play(game: &GameSession) -> Result<()> {
    let mut log = ChatLog::new();
    let update = log.push_all(game.start().await?, false);
    print_update(&log, &update);
    println!("Type a message, /action <name>, /explain <word>, /roster or /quit.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = if line == "/quit" {
            break;
        } else if line == "/roster" {
            print_roster();
            continue;
        } else if let Some(action) = line.strip_prefix("/action ") {
            game.action(action.trim()).await.map(|outcome| {
                if outcome.show_tutorial {
                    for step in roster::TUTORIAL_STEPS.iter() {
                        println!("{}: {}", step.title, step.text);
                    }
                    if let Err(e) = game.complete_tutorial() {
                        tracing::warn!(error = %e, "Could not store tutorial flag");
                    }
                }
                (outcome.messages, outcome.replaces_intro)
            })
        } else if let Some(word) = line.strip_prefix("/explain ") {
            let context = log.last_content().map(to_plain_text).unwrap_or_default();
            game.explain(word, &context).await.map(|messages| (messages, false))
        } else if !log.is_unlocked() {
            println!("Follow the story to unlock the chat (use /action).");
            continue;
        } else {
            if let Some(character) = roster::typing_character(None) {
                println!("{} is typing…", character.name);
            }
            log.push(DisplayMessage::user(line));
            game.send_message(line).await.map(|messages| (messages, false))
        };

        match result {
            Ok((messages, replaces_intro)) => {
                let update = log.push_all(messages, replaces_intro);
                print_update(&log, &update);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                if e.needs_login() {
                    eprintln!("{}", SESSION_EXPIRED_NOTICE);
                }
            }
        }
    }
    Ok(())
}

fn print_roster() {
    println!("Characters:");
    for character in roster::CHARACTERS.iter() {
        println!("  {} {:<18} {}", character.emoji, character.name, character.action);
    }
    println!("Case materials:");
    for material in roster::CASE_MATERIALS.iter() {
        println!("  {} {:<28} {}", material.emoji, material.name, material.action);
    }
    println!("Menu:");
    for item in roster::MENU_ITEMS.iter() {
        println!("  {:<20} {}", item.label, item.action);
    }
}

fn print_highlights(highlights: &HighlightManager, message: &str) {
    let id = message_id(message);
    let words = highlights.words(&id);
    if words.is_empty() {
        println!("No highlights for {}.", id);
    } else {
        println!("Highlights for {} ({}):", id, words.len());
        for word in words {
            println!("  {}", word);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let config = build_config(&cli)?;
    let storage = Storage::new(data_dir.join("store.redb"))?;
    let auth = SessionManager::new(ApiClient::new(&config.api_base_url)?, storage.clone());

    match cli.command {
        Commands::Info => {
            println!("Teach & Tell v0.1.0");
            println!();
            println!("Backend: {}", config.api_base_url);
            println!("Content directory: {}", config.content_dir.display());
            println!("Data directory: {}", data_dir.display());
            println!();
            match auth.stored_session()? {
                Some(session) => println!("Session: signed in as {}", session.participant_code),
                None => println!("Session: not signed in"),
            }
        }

        Commands::Login { code } => {
            let session = auth.login(&code).await?;
            println!("Signed in as {}", session.participant_code);
        }

        Commands::Session => match auth.restore_session().await? {
            Some(session) => println!("Session valid for {}", session.participant_code),
            None => println!("No valid session. Sign in with: teachtell login <code>"),
        },

        Commands::Logout => {
            auth.logout()?;
            println!("Signed out.");
        }

        Commands::Course { action } => match action {
            CourseAction::List => {
                let weeks = load_weeks(&config).await;
                println!("Weeks ({}):", weeks.len());
                println!();
                for week in weeks {
                    match &week.error {
                        Some(err) => println!("  {} {} [error: {}]", week.id, week.title, err),
                        None => println!(
                            "  {} {} ({} sections · {} tasks)",
                            week.id,
                            week.title,
                            week.sections.len(),
                            week.tasks.len()
                        ),
                    }
                }
            }

            CourseAction::Show { week_id } => {
                let weeks = load_weeks(&config).await;
                let week = weeks
                    .iter()
                    .find(|w| w.id == week_id)
                    .ok_or_else(|| anyhow::anyhow!("Week not found: {}", week_id))?;

                println!("{}", week.title);
                if !week.summary.is_empty() {
                    println!("  {}", week.summary);
                }
                println!();
                for section in week.ordered_sections() {
                    println!(
                        "  [{}] {} ({})",
                        section.category.label(),
                        section.heading,
                        section.id
                    );
                }
            }

            CourseAction::Build => {
                let path = build_content(&config.content_dir, &config.weeks, &config.course).await?;
                println!(
                    "Wrote {} at {}",
                    path.display(),
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                );
            }
        },

        Commands::Progress { action } => {
            let weeks = load_weeks(&config).await;
            let mut progress = open_progress(storage, weeks)?;

            match action {
                ProgressAction::Show => {
                    let overall = progress.overall_progress();
                    println!(
                        "Overall: {}/{} tasks ({}%)",
                        overall.completed,
                        overall.total,
                        overall.percent()
                    );
                    println!();
                    for week in progress.weeks() {
                        let p = progress.week_progress(&week.id);
                        let current = if progress.current_week_id() == Some(week.id.as_str()) {
                            " *"
                        } else {
                            ""
                        };
                        println!("  {} {}/{}{}", week.id, p.completed, p.total, current);
                        for task in &week.tasks {
                            let status = if progress.is_task_completed(&week.id, &task.id) {
                                "✓"
                            } else {
                                "○"
                            };
                            println!("    {} {} {}", status, task.id, task.heading);
                        }
                    }
                }

                ProgressAction::Toggle {
                    week_id,
                    task_id,
                    undo,
                } => {
                    let known = progress
                        .week(&week_id)
                        .is_some_and(|w| w.tasks.iter().any(|t| t.id == task_id));
                    if !known {
                        anyhow::bail!("Task not found: {} in {}", task_id, week_id);
                    }
                    progress.toggle_task(&week_id, &task_id, !undo)?;
                    let status = if undo { "incomplete" } else { "completed" };
                    println!("Toggled task: {} -> {}", task_id, status);
                }

                ProgressAction::Notes { week_id, text } => {
                    progress.set_notes(&week_id, &text)?;
                    println!("Notes saved for {}", week_id);
                }

                ProgressAction::Select { week_id } => {
                    if progress.week(&week_id).is_none() {
                        anyhow::bail!("Week not found: {}", week_id);
                    }
                    progress.set_current_week(&week_id)?;
                    println!("Current week: {}", week_id);
                }
            }
        }

        Commands::Highlight { action } => {
            let mut highlights = HighlightManager::load(storage)?;
            match action {
                HighlightAction::Add { message, phrase } => {
                    let id = message_id(&message);
                    match highlights.highlight_selection(&id, &phrase)? {
                        HighlightOutcome::Added(p) => println!("Highlighted \"{}\" in {}", p, id),
                        HighlightOutcome::Invalid => {
                            anyhow::bail!("Select 2-50 characters including a letter or digit")
                        }
                        HighlightOutcome::AlreadyHighlighted => {
                            println!("\"{}\" is already highlighted", phrase.trim())
                        }
                        HighlightOutcome::InsideExisting => {
                            println!("\"{}\" is inside an existing highlight", phrase.trim())
                        }
                    }
                }
                HighlightAction::List { message } => print_highlights(&highlights, &message),
                HighlightAction::Remove { message, phrase } => {
                    let id = message_id(&message);
                    if highlights.remove_highlight(&id, &phrase)? {
                        println!("Removed \"{}\"", phrase);
                    } else {
                        println!("\"{}\" was not highlighted", phrase);
                    }
                }
            }
        }

        Commands::Explain { word, text } => {
            let explanation = Explainer::new(auth).explain(&word, &text).await?;
            println!("{}", explanation.to_markdown());
        }

        Commands::Game { action } => {
            let game = GameSession::new(auth);
            match action {
                GameAction::Start => print_displayed(&game.start().await?),
                GameAction::Action { action } => {
                    print_displayed(&game.action(&action).await?.messages)
                }
                GameAction::Say { text } => print_displayed(&game.send_message(&text).await?),
                GameAction::Roster => print_roster(),
            }
        }

        Commands::Play => {
            let game = GameSession::new(auth);
            play(&game).await?;
        }
    }

    Ok(())
}
