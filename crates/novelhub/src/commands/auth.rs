//! Login, logout and token refresh commands.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use console::Style;
use serde::Serialize;

use super::Context;

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(short, long, env = "NOVELHUB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginOutput<'a> {
    username: &'a str,
    roles: &'a [String],
    admin: bool,
}

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    if username.is_empty() {
        bail!("A username is required");
    }
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    let session = ctx.client.auth().login(&username, &password).await?;

    if ctx.json_output {
        let output = LoginOutput {
            username: &username,
            roles: &session.roles,
            admin: session.is_admin(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        ctx.success(format!("Logged in as {}", username));
        if ctx.verbose {
            let dim = Style::new().dim();
            println!(
                "{}",
                dim.apply_to(format!("Session saved to {}", ctx.session_file.display()))
            );
        }
    }
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.session.load_stored_token()?;
    let was_authenticated = ctx.session.is_authenticated();

    ctx.client.auth().logout().await?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "logged_out": was_authenticated }));
    } else if was_authenticated {
        ctx.success("Logged out");
    } else {
        let dim = Style::new().dim();
        println!("{}", dim.apply_to("Not logged in"));
    }
    Ok(())
}

/// Run the refresh command.
pub async fn refresh(ctx: &Context) -> Result<()> {
    ctx.session.load_stored_token()?;
    ctx.client.auth().refresh_access_token().await?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "refreshed": true }));
    } else {
        ctx.success("Access token refreshed");
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
