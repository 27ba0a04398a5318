//! Choices command - choice lists for form inputs.

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::resource::{AUDIO_STYLES, LANGUAGES};
use super::{Context, print_records};

/// Arguments for the choices command.
#[derive(Args, Debug)]
pub struct ChoicesArgs {
    /// Which choice list to fetch
    #[arg(value_enum)]
    pub list: ChoiceList,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceList {
    /// Supported languages
    Languages,
    /// Audio voice styles
    AudioStyles,
}

/// Run the choices command.
pub async fn run(args: ChoicesArgs, ctx: &Context) -> Result<()> {
    let choices = ctx.client.choices();
    let (records, title) = match args.list {
        ChoiceList::Languages => {
            ctx.enter(LANGUAGES.route)?;
            (choices.languages().await?, "Language Choices")
        }
        ChoiceList::AudioStyles => {
            ctx.enter(AUDIO_STYLES.route)?;
            (choices.audio_styles().await?, "Audio Style Choices")
        }
    };
    print_records(ctx, title, &records)
}
