//! Read-only access to the memory store.
//!
//! The store is an external REST service (PostgREST conventions) that owns
//! the `memories` table. This module exposes the narrow client surface the
//! service needs; [`RestStore`] is the production implementation.

pub mod rest;

pub use rest::RestStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::memory::MemoryRecord;

/// Store connection settings.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Base URL of the store service.
    pub base_url: String,
    /// Privileged service key.
    pub service_key: String,
}

/// Narrow, read-only client for the memory store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetch a memory record by id. Returns `None` when no row matches.
    async fn get_memory(&self, id: &str) -> Result<Option<MemoryRecord>>;

    /// Generic equality-filtered query over the `memories` table.
    ///
    /// Unused by the request path until the resonance lookup is implemented.
    async fn query_memories(
        &self,
        filters: &[(&str, &str)],
        limit: usize,
    ) -> Result<Vec<MemoryRecord>>;

    /// Similarity search via the store's `match_memories` RPC.
    ///
    /// Unused by the request path until vector extraction is implemented.
    async fn match_memories(
        &self,
        query_embedding: &[f32],
        match_threshold: f32,
        match_count: usize,
    ) -> Result<Vec<MemoryRecord>>;
}
