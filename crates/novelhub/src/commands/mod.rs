//! CLI command handlers.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use console::{Style, style};
use novelhub_client::NovelHubClient;
use novelhub_router::{History, LOGIN, Navigation, Router};
use novelhub_session::SessionStore;
use serde_json::Value;

pub mod auth;
pub mod choices;
pub mod novels;
pub mod open;
pub mod resource;
pub mod routes;
pub mod status;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// API base URL requests are sent to.
    pub server_url: String,
    /// Environment name the base URL was resolved for.
    pub environment: String,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// File the session tokens are persisted to.
    pub session_file: PathBuf,
    /// Session shared by the client and the router.
    pub session: SessionStore,
    /// Navigation history of this invocation.
    pub history: Arc<History>,
    pub router: Router,
    pub client: NovelHubClient,
}

impl Context {
    /// Navigate to a screen, failing if the guard sends us elsewhere.
    pub fn enter(&self, screen: &str) -> Result<Navigation> {
        let nav = self.router.navigate(&self.session, screen)?;
        if nav.route.name != screen {
            let reason = if nav.route.path == LOGIN {
                "you are not logged in (run `novelhub login`)"
            } else {
                "this screen requires the admin role"
            };
            bail!("Cannot open {}: {}", screen, reason);
        }

        if self.verbose {
            let dim = Style::new().dim();
            eprintln!("{}", dim.apply_to(format!("→ {}", nav.route.path)));
        }
        Ok(nav)
    }

    /// Print a success line, or nothing in JSON mode.
    pub fn success(&self, message: impl std::fmt::Display) {
        if !self.json_output {
            let green = Style::new().green();
            println!("{} {}", green.apply_to("✓"), message);
        }
    }
}

/// Parse a `--data` argument: inline JSON, or `@path` to read a file.
pub fn parse_data(data: &str) -> Result<Value> {
    let raw = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?,
        None => data.to_string(),
    };
    serde_json::from_str(&raw).context("--data must be valid JSON")
}

/// Print records returned by the server.
pub fn print_records(ctx: &Context, title: &str, value: &Value) -> Result<()> {
    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));

    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("items").or_else(|| map.get("data")) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                println!("{}", serde_json::to_string_pretty(value)?);
                return Ok(());
            }
        },
        other => {
            println!("{}", other);
            return Ok(());
        }
    };

    if items.is_empty() {
        println!("{}", dim.apply_to("No records found"));
    }
    for item in items {
        let id = item
            .get("id")
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {}",
            dim.apply_to(format!("[{}]", id)),
            truncate(&summary(item), 70)
        );
    }
    Ok(())
}

/// Print a single record.
pub fn print_record(ctx: &Context, value: &Value) -> Result<()> {
    if ctx.json_output || !value.is_null() {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

const LABEL_FIELDS: &[&str] = &[
    "name",
    "title",
    "username",
    "style_name",
    "language_name",
    "prompt_type",
    "content",
];

fn summary(item: &Value) -> String {
    LABEL_FIELDS
        .iter()
        .find_map(|field| item.get(*field).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| item.to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_chars {
        s
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
