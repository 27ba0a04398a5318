//! Novels API.

use crate::client::NovelHubClient;
use crate::error::Result;
use crate::types::{CreateNovel, PageQuery, Record};

use super::ResourceApi;

/// Query for selecting which novel fields the server returns.
#[derive(Debug, Default, serde::Serialize)]
struct FieldsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<String>,
}

/// Novels API client.
pub struct NovelsApi {
    client: NovelHubClient,
    resource: ResourceApi<CreateNovel>,
}

impl NovelsApi {
    pub(crate) fn new(client: NovelHubClient) -> Self {
        let resource = ResourceApi::new(client.clone(), "novels");
        Self { client, resource }
    }

    /// List all novels.
    pub async fn list(&self) -> Result<Record> {
        self.resource.list().await
    }

    /// List novels, returning only the named fields.
    ///
    /// An empty field list returns full records.
    pub async fn list_fields(&self, fields: &[&str]) -> Result<Record> {
        let query = FieldsQuery {
            fields: (!fields.is_empty()).then(|| fields.join(",")),
        };
        self.client.get_with_query("novels", &query).await
    }

    /// List one page of novels.
    pub async fn list_page(&self, query: &PageQuery) -> Result<Record> {
        self.resource.list_page(query).await
    }

    /// Chapters of one novel.
    pub async fn chapters(&self, novel_id: i64) -> Result<Record> {
        self.client.get(&format!("novels/{}/chapters", novel_id)).await
    }

    /// Get a novel by ID.
    pub async fn get(&self, id: i64) -> Result<Record> {
        self.resource.get(id).await
    }

    /// Create a novel.
    pub async fn create(&self, request: &CreateNovel) -> Result<Record> {
        self.resource.create(request).await
    }

    /// Update a novel.
    pub async fn update<B: serde::Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<Record> {
        self.resource.update(id, body).await
    }

    /// Delete a novel.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }
}
