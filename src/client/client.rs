use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::client::{
    error::ApiError,
    types::*,
};

/// Per-request timeout; the catalog API answers locally in milliseconds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote recipe collection operations, enabling mockability in tests.
///
/// The coordinator only talks to this trait; production code injects a
/// [`RecipeClient`], tests inject a scripted implementation.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetch one page of the full collection.
    async fn list(&self, page: u32, limit: u32) -> Result<Page, ApiError>;

    /// Fetch one page of records matching `query`.
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Page, ApiError>;

    /// Fetch a single record by id.
    async fn get(&self, id: &str) -> Result<Recipe, ApiError>;

    /// Create a record from a draft.
    async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError>;

    /// Apply a partial update to an existing record.
    async fn update(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ApiError>;

    /// Delete a record by id.
    async fn delete(&self, id: &str) -> Result<Deleted, ApiError>;
}

/// HTTP implementation of [`RecipeApi`] against the catalog service.
pub struct RecipeClient {
    base_url: String,
    client: Client,
}

impl RecipeClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:3000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode the JSON reply.
    ///
    /// Non-2xx replies have their body read and parsed as [`ErrorBody`];
    /// a body that is not JSON degrades to `None`, never to a failure of
    /// the error path itself.
    async fn dispatch<T>(
        &self,
        method: Method,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(%method, url, "catalog request");

        let response = request
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(method.clone(), url, e))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            tracing::error!(%method, url, %status, body = %raw, "catalog request failed");
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status,
                body: serde_json::from_str::<ErrorBody>(&raw).ok(),
            });
        }

        tracing::debug!(%method, url, %status, "catalog response");
        response
            .json()
            .await
            .map_err(|e| ApiError::from_reqwest(method, url, e))
    }
}

#[async_trait]
impl RecipeApi for RecipeClient {
    async fn list(&self, page: u32, limit: u32) -> Result<Page, ApiError> {
        let url = format!("{}/recipes?page={}&limit={}", self.base_url, page, limit);
        self.dispatch(Method::GET, &url, self.client.get(&url)).await
    }

    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Page, ApiError> {
        let url = format!(
            "{}/recipes/search?q={}&page={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            page,
            limit
        );
        self.dispatch(Method::GET, &url, self.client.get(&url)).await
    }

    async fn get(&self, id: &str) -> Result<Recipe, ApiError> {
        let url = format!("{}/recipes/{}", self.base_url, urlencoding::encode(id));
        self.dispatch(Method::GET, &url, self.client.get(&url)).await
    }

    async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        let url = format!("{}/recipes", self.base_url);
        self.dispatch(Method::POST, &url, self.client.post(&url).json(draft))
            .await
    }

    async fn update(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ApiError> {
        let url = format!("{}/recipes/{}", self.base_url, urlencoding::encode(id));
        self.dispatch(Method::PUT, &url, self.client.put(&url).json(patch))
            .await
    }

    async fn delete(&self, id: &str) -> Result<Deleted, ApiError> {
        let url = format!("{}/recipes/{}", self.base_url, urlencoding::encode(id));
        self.dispatch(Method::DELETE, &url, self.client.delete(&url))
            .await
    }
}
