//! CRUD commands for the management screens.
//!
//! Each command belongs to a screen of the route table. The screen is
//! entered first, so the route guard decides whether the command may run.

use anyhow::Result;
use clap::{Args, Subcommand};
use novelhub_client::PageQuery;
use novelhub_client::api::ResourceApi;

use super::{Context, parse_data, print_record, print_records};

/// A screen and the API collection it manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Route name in the route table.
    pub route: &'static str,
    /// Collection path relative to the API base URL.
    pub resource: &'static str,
    /// Heading for listings.
    pub title: &'static str,
}

impl Screen {
    const fn new(route: &'static str, resource: &'static str, title: &'static str) -> Self {
        Self {
            route,
            resource,
            title,
        }
    }
}

pub const NOVELS: Screen = Screen::new("novelmgm", "novels", "Novels");
pub const CHAPTERS: Screen = Screen::new("novelchapter", "novel_chapters", "Chapters");
pub const STYLES: Screen = Screen::new("novelstyle", "novel_styles", "Novel Styles");
pub const TRANSLATIONS: Screen =
    Screen::new("machinetrans", "machine_translations", "Machine Translations");
pub const CORRECTIONS: Screen =
    Screen::new("usercorrection", "user_corrections", "User Corrections");
pub const HISTORIES: Screen =
    Screen::new("transconverthistory", "convert_histories", "Conversion History");
pub const AUDIOS: Screen = Screen::new("resourcegenaudio", "gen_audios", "Generated Audio");
pub const IMAGES: Screen = Screen::new("resourcegenimage", "gen_imgs", "Generated Images");
pub const VIDEOS: Screen = Screen::new("resourcegenvideo", "gen_videos", "Generated Videos");
pub const LANGUAGES: Screen = Screen::new("supportlang", "supports", "Supported Languages");
pub const AUDIO_STYLES: Screen =
    Screen::new("resourceaudiostyle", "audio_styles", "Audio Styles");
pub const USERS: Screen = Screen::new("usermgm", "users", "Users");
pub const ROLES: Screen = Screen::new("userrole", "roles", "Roles");
pub const PERMISSIONS: Screen = Screen::new("userrole", "permissions", "Permissions");
pub const PROMPTS: Screen = Screen::new("ollamaprompt", "ollama_prompts", "Prompt Templates");
pub const SD_PARAMS: Screen = Screen::new(
    "sdparam",
    "stable_diffusion_params",
    "Stable Diffusion Parameters",
);
pub const COMMENTS: Screen = Screen::new("usercomment", "comments", "Comments");
pub const ENGINES: Screen = Screen::new("machinetrans", "trans_engines", "Translation Engines");

/// Arguments for a CRUD command.
#[derive(Args, Debug)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

/// Pagination flags for listings.
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Search term
    #[arg(short, long)]
    pub search: Option<String>,
}

impl ListArgs {
    fn query(&self) -> Option<PageQuery> {
        let query = PageQuery {
            page: self.page,
            per_page: self.per_page,
            search: self.search.clone(),
        };
        (query != PageQuery::default()).then_some(query)
    }
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// List records
    List(ListArgs),

    /// Show one record
    Show {
        /// Record ID
        id: i64,
    },

    /// Create a record
    Create {
        /// JSON body, or @file to read it from a file
        #[arg(short, long)]
        data: String,
    },

    /// Update a record
    Update {
        /// Record ID
        id: i64,

        /// JSON body, or @file to read it from a file
        #[arg(short, long)]
        data: String,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: i64,
    },
}

/// Run a CRUD command on a screen.
pub async fn run(screen: Screen, args: ResourceArgs, ctx: &Context) -> Result<()> {
    ctx.enter(screen.route)?;
    let api = ctx.client.resource(screen.resource);
    execute(&api, screen, args.command, ctx).await
}

/// Run a listing on a read-only screen.
pub async fn list(screen: Screen, args: ListArgs, ctx: &Context) -> Result<()> {
    ctx.enter(screen.route)?;
    let api = ctx.client.resource(screen.resource);
    execute(&api, screen, ResourceCommand::List(args), ctx).await
}

pub(crate) async fn execute(
    api: &ResourceApi,
    screen: Screen,
    command: ResourceCommand,
    ctx: &Context,
) -> Result<()> {
    match command {
        ResourceCommand::List(args) => {
            let records = match args.query() {
                Some(query) => api.list_page(&query).await?,
                None => api.list().await?,
            };
            print_records(ctx, screen.title, &records)
        }
        ResourceCommand::Show { id } => {
            let record = api.get(id).await?;
            print_record(ctx, &record)
        }
        ResourceCommand::Create { data } => {
            let body = parse_data(&data)?;
            let record = api.create(&body).await?;
            ctx.success(format!("Created in {}", screen.resource));
            print_record(ctx, &record)
        }
        ResourceCommand::Update { id, data } => {
            let body = parse_data(&data)?;
            let record = api.update(id, &body).await?;
            ctx.success(format!("Updated {}/{}", screen.resource, id));
            print_record(ctx, &record)
        }
        ResourceCommand::Delete { id } => {
            api.delete(id).await?;
            if ctx.json_output {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                ctx.success(format!("Deleted {}/{}", screen.resource, id));
            }
            Ok(())
        }
    }
}
