//! NovelHub - command-line client for the NovelHub content platform.
//!
//! Main entry point for the NovelHub CLI.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use console::Style;
use novelhub_client::NovelHubClient;
use novelhub_config::Environment;
use novelhub_router::{History, Router};
use novelhub_session::{FileStorage, SessionStore};

mod commands;

use commands::{auth, choices, novels, open, resource, routes, status};
use commands::resource::{ListArgs, ResourceArgs};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// NovelHub - manage novels, translations and generated media
#[derive(Parser)]
#[command(name = "novelhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL (overrides the configured environment)
    #[arg(long, global = true, env = "NOVELHUB_SERVER_URL")]
    pub server: Option<String>,

    /// Backend environment: development or production
    #[arg(long = "env", global = true, value_name = "ENV")]
    pub environment: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and save the session
    Login(auth::LoginArgs),

    /// Revoke the session's tokens and log out
    Logout,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Show session status and connection settings
    Status,

    /// Print the route table
    Routes,

    /// Navigate to a route and show where the guard sends you
    Open(open::OpenArgs),

    /// Novel management
    Novels(novels::NovelsArgs),

    /// Chapter management
    Chapters(ResourceArgs),

    /// Novel style management
    Styles(ResourceArgs),

    /// Machine translations
    Translations(ResourceArgs),

    /// User corrections of machine translations
    Corrections(ResourceArgs),

    /// Chapter conversion history
    Histories(ResourceArgs),

    /// Generated audio
    Audios(ResourceArgs),

    /// Generated images
    Images(ResourceArgs),

    /// Generated videos
    Videos(ResourceArgs),

    /// Supported languages
    Languages(ResourceArgs),

    /// Audio voice styles
    AudioStyles(ResourceArgs),

    /// User management (admin)
    Users(ResourceArgs),

    /// Role management (admin)
    Roles(ResourceArgs),

    /// Prompt templates
    Prompts(ResourceArgs),

    /// Image generation parameters
    SdParams(ResourceArgs),

    /// Chapter comments
    Comments(ResourceArgs),

    /// List permissions (admin)
    Permissions(ListArgs),

    /// List translation engines
    Engines(ListArgs),

    /// Fetch a choice list
    Choices(choices::ChoicesArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = novelhub_config::load_config(None)?;
    let config_dir = loaded.require_config_dir()?.to_path_buf();

    // Initialize tracing: console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "novelhub=debug,novelhub_client=debug,novelhub_session=debug,novelhub_router=debug,novelhub_config=debug,info"
    } else {
        "novelhub=info,novelhub_client=warn,novelhub_session=warn,novelhub_router=warn,warn"
    };

    let file_appender = tracing_appender::rolling::daily(config_dir.join("logs"), "novelhub.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "novelhub=trace,novelhub_client=trace,novelhub_session=trace,novelhub_router=trace,novelhub_config=trace,info",
                )),
        )
        .init();

    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    let config = loaded.config;
    let environment = match &cli.environment {
        Some(name) => name.parse::<Environment>()?,
        None => config.environment(),
    };
    let server_url = cli
        .server
        .clone()
        .unwrap_or_else(|| config.base_url_for(environment));

    let session_file = config.session_file(&config_dir);
    let session = SessionStore::new(FileStorage::with_path(session_file.clone()));
    let history = Arc::new(History::new());

    let client = NovelHubClient::builder()
        .base_url(&server_url)
        .timeout(config.timeout())
        .session(session.clone())
        .navigator(history.clone())
        .build()
        .with_context(|| format!("Invalid server URL: {}", server_url))?;

    // Create context for commands
    let ctx = commands::Context {
        server_url,
        environment: environment.to_string(),
        json_output: cli.json,
        verbose: cli.verbose,
        session_file,
        session,
        history,
        router: Router::default(),
        client,
    };

    // Dispatch to command handlers
    let result = match cli.command {
        Commands::Login(args) => auth::login(args, &ctx).await,
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Refresh => auth::refresh(&ctx).await,
        Commands::Status => status::run(&ctx).await,
        Commands::Routes => routes::run(&ctx).await,
        Commands::Open(args) => open::run(args, &ctx).await,
        Commands::Novels(args) => novels::run(args, &ctx).await,
        Commands::Chapters(args) => resource::run(resource::CHAPTERS, args, &ctx).await,
        Commands::Styles(args) => resource::run(resource::STYLES, args, &ctx).await,
        Commands::Translations(args) => resource::run(resource::TRANSLATIONS, args, &ctx).await,
        Commands::Corrections(args) => resource::run(resource::CORRECTIONS, args, &ctx).await,
        Commands::Histories(args) => resource::run(resource::HISTORIES, args, &ctx).await,
        Commands::Audios(args) => resource::run(resource::AUDIOS, args, &ctx).await,
        Commands::Images(args) => resource::run(resource::IMAGES, args, &ctx).await,
        Commands::Videos(args) => resource::run(resource::VIDEOS, args, &ctx).await,
        Commands::Languages(args) => resource::run(resource::LANGUAGES, args, &ctx).await,
        Commands::AudioStyles(args) => resource::run(resource::AUDIO_STYLES, args, &ctx).await,
        Commands::Users(args) => resource::run(resource::USERS, args, &ctx).await,
        Commands::Roles(args) => resource::run(resource::ROLES, args, &ctx).await,
        Commands::Prompts(args) => resource::run(resource::PROMPTS, args, &ctx).await,
        Commands::SdParams(args) => resource::run(resource::SD_PARAMS, args, &ctx).await,
        Commands::Comments(args) => resource::run(resource::COMMENTS, args, &ctx).await,
        Commands::Permissions(args) => resource::list(resource::PERMISSIONS, args, &ctx).await,
        Commands::Engines(args) => resource::list(resource::ENGINES, args, &ctx).await,
        Commands::Choices(args) => choices::run(args, &ctx).await,
    };

    if ctx.verbose {
        let dim = Style::new().dim();
        for path in ctx.history.entries() {
            eprintln!("{}", dim.apply_to(format!("navigated to {}", path)));
        }
    }

    if let Err(e) = &result
        && let Some(client_err) = e.downcast_ref::<novelhub_client::Error>()
        && client_err.is_auth_error()
        && !ctx.json_output
    {
        let dim = Style::new().dim();
        eprintln!("{}", dim.apply_to("Run `novelhub login` to sign in again."));
    }
    result
}
