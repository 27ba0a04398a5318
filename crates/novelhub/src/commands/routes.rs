//! Routes command - prints the route table.

use anyhow::Result;
use console::{Style, style};

use super::Context;

/// Run the routes command.
pub async fn run(ctx: &Context) -> Result<()> {
    let routes = ctx.router.routes();

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(routes)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let yellow = Style::new().yellow();

    println!("{}", style("Routes").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    for route in routes {
        let mut flags = Vec::new();
        if route.meta.requires_auth {
            flags.push("auth");
        }
        if route.meta.requires_admin {
            flags.push("admin");
        }

        let target = match &route.redirect {
            Some(to) => format!(" → {}", to),
            None => String::new(),
        };
        println!(
            "  {:<28} {:<20}{} {}",
            route.path,
            dim.apply_to(&route.name),
            target,
            yellow.apply_to(flags.join(","))
        );
    }
    Ok(())
}
