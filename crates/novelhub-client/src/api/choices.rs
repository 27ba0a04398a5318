//! Choice lists used to fill form selects.

use crate::client::NovelHubClient;
use crate::error::Result;
use crate::types::Record;

/// Choices API client.
pub struct ChoicesApi {
    client: NovelHubClient,
}

impl ChoicesApi {
    pub(crate) fn new(client: NovelHubClient) -> Self {
        Self { client }
    }

    /// Supported languages as choices.
    pub async fn languages(&self) -> Result<Record> {
        self.client.get("supportlang_choices").await
    }

    /// Audio voice styles as choices.
    pub async fn audio_styles(&self) -> Result<Record> {
        self.client.get("audio_style_choices").await
    }
}
