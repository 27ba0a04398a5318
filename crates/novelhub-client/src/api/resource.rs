//! Generic CRUD access to a resource collection.

use std::marker::PhantomData;

use serde::Serialize;

use crate::client::NovelHubClient;
use crate::error::Result;
use crate::types::{PageQuery, Record};

/// CRUD client for one resource path such as `novels` or `gen_audios`.
///
/// Requests and responses are passed through without transformation. `B`
/// is the body accepted by [`ResourceApi::create`]; untyped collections take
/// any [`Record`].
pub struct ResourceApi<B: ?Sized = Record> {
    client: NovelHubClient,
    path: String,
    body: PhantomData<fn(&B)>,
}

impl<B: Serialize + ?Sized> ResourceApi<B> {
    pub(crate) fn new(client: NovelHubClient, path: impl Into<String>) -> Self {
        let path = path.into().trim_matches('/').to_string();
        Self {
            client,
            path,
            body: PhantomData,
        }
    }

    /// The collection path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn item(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }

    /// List the collection.
    pub async fn list(&self) -> Result<Record> {
        self.client.get(&self.path).await
    }

    /// List one page of the collection, optionally filtered.
    pub async fn list_page(&self, query: &PageQuery) -> Result<Record> {
        self.client.get_with_query(&self.path, query).await
    }

    /// Get a record by ID.
    pub async fn get(&self, id: i64) -> Result<Record> {
        self.client.get(&self.item(id)).await
    }

    /// Create a record.
    pub async fn create(&self, body: &B) -> Result<Record> {
        self.client.post(&self.path, body).await
    }

    /// Update a record.
    pub async fn update<U: Serialize + ?Sized>(&self, id: i64, body: &U) -> Result<Record> {
        self.client.put(&self.item(id), body).await
    }

    /// Delete a record.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&self.item(id)).await
    }
}
