//! Novels command - novel management.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::resource::{self, NOVELS, ResourceCommand};
use super::{Context, print_records};

/// Arguments for the novels command.
#[derive(Args, Debug)]
pub struct NovelsArgs {
    #[command(subcommand)]
    pub command: NovelsCommand,
}

#[derive(Subcommand, Debug)]
pub enum NovelsCommand {
    #[command(flatten)]
    Crud(ResourceCommand),

    /// List novels with only the given fields
    Fields {
        /// Field names, e.g. `id name`
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// List the chapters of a novel
    Chapters {
        /// Novel ID
        novel_id: i64,
    },
}

/// Run the novels command.
pub async fn run(args: NovelsArgs, ctx: &Context) -> Result<()> {
    ctx.enter(NOVELS.route)?;
    let novels = ctx.client.novels();

    match args.command {
        NovelsCommand::Crud(command) => {
            let api = ctx.client.resource(NOVELS.resource);
            resource::execute(&api, NOVELS, command, ctx).await
        }
        NovelsCommand::Fields { fields } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let records = novels.list_fields(&fields).await?;
            print_records(ctx, NOVELS.title, &records)
        }
        NovelsCommand::Chapters { novel_id } => {
            let records = novels.chapters(novel_id).await?;
            print_records(ctx, &format!("Chapters of novel {}", novel_id), &records)
        }
    }
}
