//! REST store provider.
//!
//! Talks to a PostgREST-style API: row reads under `/rest/v1/{table}` with
//! query-string filters, functions under `/rest/v1/rpc/{name}`. The service
//! key is sent both as `apikey` and as a bearer token.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::domain::memory::MemoryRecord;

use super::{StoreClient, StoreSettings};

const MEMORIES_TABLE: &str = "memories";
const MEMORY_COLUMNS: &str = "id,content,evaluation";

/// REST implementation of [`StoreClient`].
#[derive(Clone)]
pub struct RestStore {
    http: reqwest::Client,
    settings: StoreSettings,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.settings.base_url)
            .finish()
    }
}

impl RestStore {
    /// Create a new REST store client with the given settings.
    #[must_use]
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn rpc_url(&self, function: &str) -> String {
        format!(
            "{}/rest/v1/rpc/{function}",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn authed(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        rb.header("apikey", &self.settings.service_key)
            .bearer_auth(&self.settings.service_key)
    }
}

#[async_trait]
impl StoreClient for RestStore {
    async fn get_memory(&self, id: &str) -> Result<Option<MemoryRecord>> {
        let resp = self
            .authed(self.http.get(self.table_url(MEMORIES_TABLE)))
            .query(&[
                ("id", format!("eq.{id}")),
                ("select", MEMORY_COLUMNS.to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let mut rows: Vec<MemoryRecord> = resp.json().await?;
        Ok(rows.pop())
    }

    async fn query_memories(
        &self,
        filters: &[(&str, &str)],
        limit: usize,
    ) -> Result<Vec<MemoryRecord>> {
        let mut query: Vec<(String, String)> = filters
            .iter()
            .map(|(field, value)| ((*field).to_string(), format!("eq.{value}")))
            .collect();
        query.push(("select".to_string(), MEMORY_COLUMNS.to_string()));
        query.push(("limit".to_string(), limit.to_string()));

        let resp = self
            .authed(self.http.get(self.table_url(MEMORIES_TABLE)))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }

    async fn match_memories(
        &self,
        query_embedding: &[f32],
        match_threshold: f32,
        match_count: usize,
    ) -> Result<Vec<MemoryRecord>> {
        let body = json!({
            "query_embedding": query_embedding,
            "match_threshold": match_threshold,
            "match_count": match_count,
        });

        let resp = self
            .authed(self.http.post(self.rpc_url("match_memories")))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(base_url: &str) -> RestStore {
        RestStore::new(StoreSettings {
            base_url: base_url.to_string(),
            service_key: "service-key".to_string(),
        })
    }

    #[tokio::test]
    async fn get_memory_returns_matching_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/memories"))
            .and(query_param("id", "eq.m1"))
            .and(query_param("select", "id,content,evaluation"))
            .and(header("apikey", "service-key"))
            .and(header("authorization", "Bearer service-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "m1", "content": "first day at the lake", "evaluation": "felt calm" }
            ])))
            .mount(&server)
            .await;

        let record = store(&server.uri())
            .get_memory("m1")
            .await
            .unwrap()
            .expect("row should match");
        assert_eq!(record.id, "m1");
        assert_eq!(record.content, "first day at the lake");
        assert_eq!(record.evaluation, "felt calm");
    }

    #[tokio::test]
    async fn get_memory_returns_none_for_missing_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/memories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let record = store(&server.uri()).get_memory("missing").await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn query_memories_applies_filters_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/memories"))
            .and(query_param("id", "eq.m2"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "m2", "content": "c", "evaluation": "e" }
            ])))
            .mount(&server)
            .await;

        let rows = store(&server.uri())
            .query_memories(&[("id", "m2")], 3)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "m2");
    }

    #[tokio::test]
    async fn match_memories_posts_rpc_arguments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/match_memories"))
            .and(body_partial_json(serde_json::json!({
                "match_threshold": 0.5,
                "match_count": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let rows = store(&server.uri())
            .match_memories(&[0.25, 0.5], 0.5, 5)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn store_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/memories"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = store(&server.uri()).get_memory("m1").await;
        assert!(result.is_err());
    }
}
