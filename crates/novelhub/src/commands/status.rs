//! Status command - shows session and connection settings.

use anyhow::Result;
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Status for JSON output.
#[derive(Debug, Serialize)]
struct StatusOutput {
    authenticated: bool,
    admin: bool,
    roles: Vec<String>,
    server_url: String,
    environment: String,
    session_file: String,
}

/// Run the status command.
pub async fn run(ctx: &Context) -> Result<()> {
    ctx.session.load_stored_token()?;
    let session = ctx.session.snapshot();

    let output = StatusOutput {
        authenticated: session.is_authenticated(),
        admin: session.is_admin(),
        roles: session.roles.clone(),
        server_url: ctx.server_url.clone(),
        environment: ctx.environment.clone(),
        session_file: ctx.session_file.display().to_string(),
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let green = Style::new().green();
    let yellow = Style::new().yellow();
    let dim = Style::new().dim();

    println!();
    println!("{}", style("NovelHub Status").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();
    if output.authenticated {
        println!("  {} {}", dim.apply_to("Session:"), green.apply_to("● logged in"));
    } else {
        println!("  {} {}", dim.apply_to("Session:"), yellow.apply_to("○ logged out"));
    }
    if !output.roles.is_empty() {
        println!("  {} {}", dim.apply_to("Roles:"), output.roles.join(", "));
    }
    println!("  {} {}", dim.apply_to("Server:"), output.server_url);
    println!("  {} {}", dim.apply_to("Environment:"), output.environment);
    if ctx.verbose {
        println!("  {} {}", dim.apply_to("Session file:"), output.session_file);
    }
    println!();

    Ok(())
}
