//! Scene graph: node arena, lifecycle sweeps, and the JSON document format.

pub mod document;
pub mod graph;
pub mod node;

// Re-export main types for convenience
pub use document::{from_json, instantiate, serialize_node, to_json, NodeDocument};
pub use graph::SceneGraph;
pub use node::{Node, NodeId, NodeKind, Transform};

// Error types
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("Node {id} is not a scene root")]
    NotASceneRoot { id: NodeId },

    #[error("Scene root {id} already exposes a physics world")]
    WorldAlreadyBound { id: NodeId },

    #[error("Document encode/decode failed: {0}")]
    Document(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
