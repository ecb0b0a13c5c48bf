//! Affinity discovery over stored memories.
//!
//! Prompt construction for the two analysis modes, plus the extraction and
//! lookup steps that turn analysis text into resonant memories.
//!
//! Extraction and lookup are not implemented yet: the shape of an affinity
//! vector and the matching procedure are still owned by the product side,
//! so both steps succeed with empty results.

use anyhow::Result;

use crate::domain::memory::{AffinityVector, MemoryRecord};
use crate::llm::Message;
use crate::store::StoreClient;

/// System instruction for memory-mode analysis.
pub const MEMORY_ANALYSIS_PROMPT: &str = "You are Ella, discovering natural connections between memories.
Consider multiple dimensions:
1. Emotional resonance
2. Thematic links
3. Personal significance
4. Temporal relationships
5. Causal connections";

/// System instruction for query-mode analysis.
pub const QUERY_ANALYSIS_PROMPT: &str = "You are Ella, discovering memories that resonate with a query.
Consider multiple dimensions:
1. Emotional alignment
2. Thematic relevance
3. Personal significance
4. Contextual importance
5. Deeper meaning";

/// Build the completion messages for memory-mode analysis.
#[must_use]
pub fn memory_analysis_messages(memory: &MemoryRecord) -> Vec<Message> {
    vec![
        Message::system(MEMORY_ANALYSIS_PROMPT),
        Message::user(format!(
            "Analyze this memory and its evaluation to discover potential affinities:\nMemory: {}\nEvaluation: {}",
            memory.content, memory.evaluation
        )),
    ]
}

/// Build the completion messages for query-mode analysis.
#[must_use]
pub fn query_analysis_messages(evaluation: &str) -> Vec<Message> {
    vec![
        Message::system(QUERY_ANALYSIS_PROMPT),
        Message::user(format!(
            "Find memories that resonate with this query evaluation:\n{evaluation}"
        )),
    ]
}

/// Extract affinity vectors from memory-mode analysis text.
///
/// Not implemented: the scheme for turning free-text analysis into
/// structured dimension scores is undefined. Returns no vectors.
#[must_use]
pub fn extract_affinity_vectors(_analysis: &str) -> Vec<AffinityVector> {
    Vec::new()
}

/// Extract resonance vectors from query-mode analysis text.
///
/// Not implemented, see [`extract_affinity_vectors`]. Returns no vectors.
#[must_use]
pub fn extract_resonance_vectors(_analysis: &str) -> Vec<AffinityVector> {
    Vec::new()
}

/// Find memories that resonate with the given vectors.
///
/// Not implemented: the intended combination of vector similarity
/// ([`StoreClient::match_memories`]) and metadata matching
/// ([`StoreClient::query_memories`]) is unspecified. Succeeds with an
/// empty result set.
///
/// # Errors
///
/// Infallible today; the signature is fallible because a real
/// implementation will read the store.
pub async fn find_resonant_memories(
    _store: &dyn StoreClient,
    _vectors: &[AffinityVector],
) -> Result<Vec<MemoryRecord>> {
    Ok(Vec::new())
}
