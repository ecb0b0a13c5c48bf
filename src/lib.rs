//! Affinity Discovery Service
//!
//! A thin HTTP service that forwards memory and evaluation text to a
//! chat-completion API and reads memory records from a hosted REST store.
//! The analysis text comes back as free text; turning it into structured
//! affinity vectors and resonant-memory lookups is still pending, so those
//! steps currently yield empty results.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server with tracing and timeout middleware
//! - **Completion client**: non-streaming Chat Completions driver
//! - **Store client**: narrow read-only REST client for the memory store
//! - **Affinity**: prompt construction and the unimplemented extraction and
//!   lookup seams
//!
//! # Modules
//!
//! - [`affinity`]: prompts, extraction and lookup stubs
//! - [`api`]: HTTP handlers
//! - [`config`]: configuration layering and upstream settings
//! - [`domain`]: shared record types
//! - [`llm`]: completion client trait and driver
//! - [`store`]: store client trait and REST provider

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod affinity;
pub mod api;
pub mod config;
pub mod domain;
pub mod llm;
pub mod server;
pub mod store;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::CompletionDriver;
use crate::store::StoreClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Completion client for analysis requests.
    pub completion: Arc<dyn CompletionDriver>,
    /// Read-only store client.
    pub store: Arc<dyn StoreClient>,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}
