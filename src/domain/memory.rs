use serde::{Deserialize, Serialize};

/// A stored memory record. Owned entirely by the external store; this
/// service only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub content: String,
    pub evaluation: String,
}

/// One dimension of similarity extracted from free-text analysis.
///
/// The concrete representation (numeric embedding, tagged category, free-text
/// label) is still undecided upstream, so the payload stays opaque JSON and
/// nothing may depend on its internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityVector(pub serde_json::Value);
