use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::affinity::{
    self, extract_affinity_vectors, extract_resonance_vectors, find_resonant_memories,
};

/// Operating mode for an affinity request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AffinityMode {
    /// Analyze a stored memory.
    #[default]
    Memory,
    /// Analyze a free-text query evaluation.
    Query,
    /// Any unrecognized mode value.
    Unknown,
}

impl From<String> for AffinityMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "memory" => Self::Memory,
            "query" => Self::Query,
            _ => Self::Unknown,
        }
    }
}

/// Request body for affinity discovery.
#[derive(Debug, Deserialize)]
pub struct AffinityRequest {
    /// Memory to analyze (memory mode).
    #[serde(default)]
    pub memory_id: Option<String>,
    /// Evaluation text to analyze (query mode).
    #[serde(default)]
    pub evaluation: Option<String>,
    /// Operating mode, defaults to memory.
    #[serde(default)]
    pub mode: AffinityMode,
}

/// ANY /api/affinity - Discover memories that resonate with a stored memory
/// or a query evaluation.
pub async fn discover_affinities_handler(
    State(state): State<AppState>,
    Json(req): Json<AffinityRequest>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        mode = ?req.mode,
        memory_id = ?req.memory_id,
        has_evaluation = req.evaluation.is_some(),
        "Received affinity request"
    );

    let memory_id = nonempty(req.memory_id.as_deref());
    let evaluation = nonempty(req.evaluation.as_deref());

    match (req.mode, memory_id, evaluation) {
        (AffinityMode::Memory, Some(id), _) => discover_for_memory(&state, &request_id, id).await,
        (AffinityMode::Query, _, Some(eval)) => discover_for_query(&state, &request_id, eval).await,
        _ => {
            tracing::info!(request_id = %request_id, "Rejected invalid affinity request");
            error_response(StatusCode::BAD_REQUEST, "Invalid request parameters")
        }
    }
}

/// Memory mode: analyze a stored memory and look up what resonates with it.
async fn discover_for_memory(state: &AppState, request_id: &str, memory_id: &str) -> Response {
    let memory = match state.store.get_memory(memory_id).await {
        Ok(Some(m)) => m,
        Ok(None) => {
            tracing::info!(request_id = %request_id, memory_id = %memory_id, "Memory not found");
            return error_response(StatusCode::NOT_FOUND, "Memory not found");
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                memory_id = %memory_id,
                error = %e,
                "Store lookup failed"
            );
            return error_response(StatusCode::BAD_GATEWAY, &format!("Store lookup failed: {e}"));
        }
    };

    let messages = affinity::memory_analysis_messages(&memory);
    let analysis = match state.completion.complete(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                memory_id = %memory_id,
                error = %e,
                "Completion request failed"
            );
            return error_response(
                StatusCode::BAD_GATEWAY,
                &format!("Completion request failed: {e}"),
            );
        }
    };

    let vectors = extract_affinity_vectors(&analysis);
    match find_resonant_memories(state.store.as_ref(), &vectors).await {
        Ok(memories) => {
            tracing::info!(
                request_id = %request_id,
                memory_id = %memory_id,
                vector_count = vectors.len(),
                result_count = memories.len(),
                "Affinity discovery complete"
            );
            Json(memories).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                memory_id = %memory_id,
                error = %e,
                "Resonance lookup failed"
            );
            error_response(StatusCode::BAD_GATEWAY, &format!("Resonance lookup failed: {e}"))
        }
    }
}

/// Query mode: analyze the evaluation text directly.
async fn discover_for_query(state: &AppState, request_id: &str, evaluation: &str) -> Response {
    let messages = affinity::query_analysis_messages(evaluation);
    let analysis = match state.completion.complete(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Completion request failed");
            return error_response(
                StatusCode::BAD_GATEWAY,
                &format!("Completion request failed: {e}"),
            );
        }
    };

    let vectors = extract_resonance_vectors(&analysis);
    match find_resonant_memories(state.store.as_ref(), &vectors).await {
        Ok(memories) => {
            tracing::info!(
                request_id = %request_id,
                vector_count = vectors.len(),
                result_count = memories.len(),
                "Resonance discovery complete"
            );
            Json(memories).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Resonance lookup failed");
            error_response(StatusCode::BAD_GATEWAY, &format!("Resonance lookup failed: {e}"))
        }
    }
}

/// GET /api/memories/:id - Fetch a single memory record.
pub async fn get_memory_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get_memory(&id).await {
        Ok(Some(memory)) => Json(memory).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Memory not found"),
        Err(e) => {
            tracing::error!(memory_id = %id, error = %e, "Store lookup failed");
            error_response(StatusCode::BAD_GATEWAY, &format!("Store lookup failed: {e}"))
        }
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
