//! Request and response types for the NovelHub API.
//!
//! Records returned by the server are passed through untouched as
//! [`Record`]. Request bodies for creation carry the fields the server
//! expects; updates accept any serializable value.

use serde::{Deserialize, Serialize};

/// An opaque record as returned by the server.
pub type Record = serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Credentials posted to `/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body returned by `/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Role names, given either as strings or as `{ "name": ... }` objects.
    #[serde(default)]
    pub roles: Option<serde_json::Value>,
}

impl LoginResponse {
    /// Access token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Role names carried by the response.
    pub fn role_names(&self) -> Vec<String> {
        let Some(serde_json::Value::Array(items)) = &self.roles else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(name) => Some(name.clone()),
                serde_json::Value::Object(map) => map
                    .get("name")
                    .and_then(|n| n.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .collect()
    }
}

/// Body posted to `/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body returned by `/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Listing
// ─────────────────────────────────────────────────────────────────────────────

/// Pagination and search parameters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Novels
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a novel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNovel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Supported-language id.
    pub language: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
}

/// Request to create a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChapter {
    pub novel_id: i64,
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
}

/// Request to create a novel style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStyle {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Translation
// ─────────────────────────────────────────────────────────────────────────────

/// Request to store a machine translation of a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMachineTranslation {
    pub chapter_id: i64,
    pub translated_content: String,
    pub source_language: String,
    pub target_language: String,
    pub translation_engine: String,
}

/// Request to correct a machine translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserCorrection {
    pub machine_translation_id: i64,
    pub corrected_content: String,
}

/// Request to record a chapter conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConvertHistory {
    pub chapter_id: i64,
    pub target_language_id: i64,
    pub is_translated: bool,
    pub is_audio_generated: bool,
    pub is_video_generated: bool,
}

/// Request to add a supported language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupport {
    pub language_code: String,
    pub language_name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Generated media
// ─────────────────────────────────────────────────────────────────────────────

/// Request to add a voice style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudioStyle {
    pub language_code_id: i64,
    pub style_name: String,
    pub voice_type: String,
}

/// Request to generate audio for a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenAudio {
    pub chapter_id: i64,
    pub audio_style_id: i64,
    pub speech_rate: String,
}

/// Request to generate images for a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenImage {
    pub chapter_id: i64,
    pub num_segments: i64,
    /// Stable-diffusion parameter set id.
    pub sd_id: i64,
}

/// Request to register a generated video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenVideo {
    pub chapter_id: i64,
    pub video_url: String,
    pub language_code: String,
}

/// Request to add a prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOllamaPrompt {
    pub prompt_type: String,
    pub prompt_text: String,
}

/// Request to add an image generation parameter set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStableDiffusionParam {
    pub ollama_prompt_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to update a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
}

/// Request to create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub description: String,
}

/// Request to comment on a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub chapter_id: i64,
    pub user_id: i64,
    pub content: String,
}

/// Request to collect or like a novel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovelMark {
    pub novel_id: i64,
    pub user_id: i64,
}
