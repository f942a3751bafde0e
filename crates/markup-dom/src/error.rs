//! Error types for tree operations
//!
//! Simple, flat error hierarchy. Every failing operation leaves the tree
//! exactly as it found it.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Invalid item type: {0}")]
    InvalidItemType(String),

    #[error("Cyclic structure: node {child} cannot be appended to node {parent}")]
    CyclicStructure { parent: NodeId, child: NodeId },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl DomError {
    pub(crate) fn invalid_item(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("[Collection] Rejected item: {}", message);
        DomError::InvalidItemType(message)
    }

    pub(crate) fn invalid_node_type(expected: &str, actual: impl std::fmt::Display) -> Self {
        DomError::InvalidNodeType {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
