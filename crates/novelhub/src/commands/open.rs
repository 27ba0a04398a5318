//! Open command - runs a navigation and reports where it lands.

use anyhow::Result;
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the open command.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Route path (`/index/novelmgm`) or name (`novelmgm`)
    pub target: String,
}

/// Run the open command.
pub async fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let nav = ctx.router.navigate(&ctx.session, &args.target)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&nav)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let green = Style::new().green();
    let yellow = Style::new().yellow();

    if nav.was_redirected() {
        let chain = nav
            .redirects
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(nav.route.path.as_str()))
            .collect::<Vec<_>>()
            .join(" → ");
        println!("{} {}", yellow.apply_to("↪"), chain);
    } else {
        println!("{} {}", green.apply_to("✓"), style(&nav.route.path).bold());
    }
    println!("  {} {}", dim.apply_to("Route:"), nav.route.name);
    Ok(())
}
