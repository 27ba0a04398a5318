//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use novelhub_router::{History, Navigator};
use novelhub_session::{MemoryStorage, SessionStore};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::api::{AuthApi, ChoicesApi, NovelsApi, ResourceApi};
use crate::error::{Error, ErrorResponse, Result};
use crate::middleware::{Authorization, BearerAuth};
use crate::types::{
    CreateAudioStyle, CreateChapter, CreateComment, CreateConvertHistory, CreateGenAudio,
    CreateGenImage, CreateGenVideo, CreateMachineTranslation, CreateOllamaPrompt, CreateRole,
    CreateStableDiffusionParam, CreateStyle, CreateSupport, CreateUser, CreateUserCorrection,
    NovelMark,
};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// NovelHub API client.
///
/// Every request goes through one send path that applies the bearer-token
/// middleware. Cloning is cheap; clones share the HTTP pool, the session and
/// the navigator.
///
/// # Example
///
/// ```no_run
/// use novelhub_client::NovelHubClient;
///
/// # async fn example() -> novelhub_client::Result<()> {
/// let client = NovelHubClient::builder()
///     .base_url("http://127.0.0.1:17788/api/v1/")
///     .build()?;
///
/// client.auth().login("alice", "secret").await?;
/// let novels = client.novels().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NovelHubClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests, always ending in `/`.
    pub(crate) base_url: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Session shared with the router.
    pub(crate) session: SessionStore,
    /// Navigation sink for session transitions.
    pub(crate) navigator: Arc<dyn Navigator>,
    /// Auth middleware.
    pub(crate) auth: BearerAuth,
}

impl std::fmt::Debug for NovelHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NovelHubClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl NovelHubClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The navigator session transitions are pushed to.
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Login, logout and token refresh.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Generic CRUD access to any resource path.
    pub fn resource(&self, path: impl Into<String>) -> ResourceApi {
        ResourceApi::new(self.clone(), path)
    }

    /// Novels, including field selection and per-novel chapters.
    pub fn novels(&self) -> NovelsApi {
        NovelsApi::new(self.clone())
    }

    /// Novel chapters.
    pub fn chapters(&self) -> ResourceApi<CreateChapter> {
        ResourceApi::new(self.clone(), "novel_chapters")
    }

    /// Novel styles.
    pub fn novel_styles(&self) -> ResourceApi<CreateStyle> {
        ResourceApi::new(self.clone(), "novel_styles")
    }

    /// Machine translations of chapters.
    pub fn machine_translations(&self) -> ResourceApi<CreateMachineTranslation> {
        ResourceApi::new(self.clone(), "machine_translations")
    }

    /// User corrections of machine translations.
    pub fn user_corrections(&self) -> ResourceApi<CreateUserCorrection> {
        ResourceApi::new(self.clone(), "user_corrections")
    }

    /// Chapter conversion history.
    pub fn convert_histories(&self) -> ResourceApi<CreateConvertHistory> {
        ResourceApi::new(self.clone(), "convert_histories")
    }

    /// Generated audio.
    pub fn gen_audios(&self) -> ResourceApi<CreateGenAudio> {
        ResourceApi::new(self.clone(), "gen_audios")
    }

    /// Generated images.
    pub fn gen_images(&self) -> ResourceApi<CreateGenImage> {
        ResourceApi::new(self.clone(), "gen_imgs")
    }

    /// Generated videos.
    pub fn gen_videos(&self) -> ResourceApi<CreateGenVideo> {
        ResourceApi::new(self.clone(), "gen_videos")
    }

    /// Supported languages.
    pub fn supports(&self) -> ResourceApi<CreateSupport> {
        ResourceApi::new(self.clone(), "supports")
    }

    /// Audio voice styles.
    pub fn audio_styles(&self) -> ResourceApi<CreateAudioStyle> {
        ResourceApi::new(self.clone(), "audio_styles")
    }

    /// Users.
    pub fn users(&self) -> ResourceApi<CreateUser> {
        ResourceApi::new(self.clone(), "users")
    }

    /// Roles.
    pub fn roles(&self) -> ResourceApi<CreateRole> {
        ResourceApi::new(self.clone(), "roles")
    }

    /// Permissions (read-only).
    pub fn permissions(&self) -> ResourceApi {
        self.resource("permissions")
    }

    /// Chapter comments.
    pub fn comments(&self) -> ResourceApi<CreateComment> {
        ResourceApi::new(self.clone(), "comments")
    }

    /// Novels collected by users.
    pub fn user_collects(&self) -> ResourceApi<NovelMark> {
        ResourceApi::new(self.clone(), "user_collects")
    }

    /// Novels liked by users.
    pub fn user_likes(&self) -> ResourceApi<NovelMark> {
        ResourceApi::new(self.clone(), "user_likes")
    }

    /// Prompt templates for the text model.
    pub fn ollama_prompts(&self) -> ResourceApi<CreateOllamaPrompt> {
        ResourceApi::new(self.clone(), "ollama_prompts")
    }

    /// Image generation parameters.
    pub fn stable_diffusion_params(&self) -> ResourceApi<CreateStableDiffusionParam> {
        ResourceApi::new(self.clone(), "stable_diffusion_params")
    }

    /// Translation engines (read-only).
    pub fn trans_engines(&self) -> ResourceApi {
        self.resource("trans_engines")
    }

    /// Choice lists for form inputs.
    pub fn choices(&self) -> ChoicesApi {
        ChoicesApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    /// The single send path: build, authorize, dispatch, handle 401.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        auth: &Authorization,
        build: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "Dispatching request");

        let request = self
            .inner
            .http
            .request(method, url)
            .timeout(self.inner.timeout);
        let (request, epoch) = self.inner.auth.apply(build(request), auth);

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.inner.auth.on_unauthorized(epoch);
            let message = Self::error_message(response).await;
            return Err(Error::Unauthorized(message));
        }

        Ok(response)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .execute(Method::GET, path, &Authorization::Session, |r| r)
            .await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let response = self
            .execute(Method::GET, path, &Authorization::Session, |r| r.query(query))
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        self.post_with_auth(path, body, &Authorization::Session).await
    }

    /// Make a POST request with an explicit credential.
    pub(crate) async fn post_with_auth<T, B>(
        &self,
        path: &str,
        body: &B,
        auth: &Authorization,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .execute(Method::POST, path, auth, |r| r.json(body))
            .await?;
        self.handle_response(response).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .execute(Method::PUT, path, &Authorization::Session, |r| r.json(body))
            .await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .execute(Method::DELETE, path, &Authorization::Session, |r| r)
            .await?;

        if !response.status().is_success() {
            return Err(Self::extract_error(response).await);
        }

        Ok(())
    }

    /// Handle a response, extracting the body or error.
    ///
    /// An empty success body decodes as JSON `null`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::extract_error(response).await);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Extract an error from a failed response.
    async fn extract_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let message = Self::error_message(response).await;

        if status == 404 {
            Error::NotFound(message)
        } else {
            Error::Api { status, message }
        }
    }

    /// Message of an error body, or `HTTP <status>` when there is none.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status().as_u16();
        match response.json::<ErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => format!("HTTP {}", status),
        }
    }
}

/// Builder for creating a NovelHubClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    session: Option<SessionStore>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            session: None,
            navigator: None,
        }
    }

    /// Set the API base URL (including any `/api/v1/` prefix).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use an existing session store. Defaults to an in-memory session.
    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the navigation sink. Defaults to a [`History`].
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<NovelHubClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("novelhub-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        let session = self
            .session
            .unwrap_or_else(|| SessionStore::new(MemoryStorage::new()));
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(History::new()));
        let auth = BearerAuth::new(session.clone(), navigator.clone());

        Ok(NovelHubClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                session,
                navigator,
                auth,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = ClientBuilder::new().base_url("not a url").build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .base_url("http://127.0.0.1:17788/api/v1")
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:17788/api/v1/");
    }

    #[test]
    fn test_url_building() {
        let client = ClientBuilder::new()
            .base_url("http://127.0.0.1:17788/api/v1/")
            .build()
            .unwrap();

        let url = client.url("novels").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:17788/api/v1/novels");

        let url = client.url("/novels/3/chapters").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:17788/api/v1/novels/3/chapters");
    }

    #[test]
    fn test_shares_session_with_caller() {
        let session = SessionStore::new(MemoryStorage::new());
        let client = ClientBuilder::new()
            .base_url("http://localhost")
            .session(session.clone())
            .build()
            .unwrap();

        session
            .establish(novelhub_session::Tokens::new("t", None), "alice", vec![])
            .unwrap();
        assert!(client.session().is_authenticated());
    }
}
