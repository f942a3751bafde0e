//! Core type definitions
//!
//! Node type codes follow the DOM numbering, so snapshots carry the same
//! `nodeType` values a browser would report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Node type tag, fixed when the node is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            _ => None,
        }
    }

    /// Leaves never hold children
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeType::Text | NodeType::Comment | NodeType::DocumentType
        )
    }

    /// Text-like nodes carry character content
    pub fn has_content(self) -> bool {
        matches!(self, NodeType::Text | NodeType::Comment)
    }
}

impl From<NodeType> for u8 {
    fn from(node_type: NodeType) -> Self {
        node_type as u8
    }
}

impl TryFrom<u8> for NodeType {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        NodeType::from_u8(value).ok_or_else(|| format!("unknown node type {}", value))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::Comment => "comment",
            NodeType::Document => "document",
            NodeType::DocumentType => "document type",
        };
        f.write_str(name)
    }
}

/// Fixed name of text nodes
pub const TEXT_NODE_NAME: &str = "#text";

/// Fixed name of comment nodes
pub const COMMENT_NODE_NAME: &str = "#comment";

/// Fixed name of document nodes
pub const DOCUMENT_NODE_NAME: &str = "#document";
