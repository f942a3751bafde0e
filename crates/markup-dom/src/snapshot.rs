//! JSON snapshots of a subtree
//!
//! A snapshot is a plain nested value: export it, store it, and rebuild the
//! same subtree later. Import goes through the same validation as the
//! builder API, so a snapshot can never produce a tree the API would refuse.
//!
//! ```json
//! {
//!   "nodeType": 1,
//!   "name": "div",
//!   "attributes": [{ "name": "id", "value": "x" }],
//!   "classes": ["card"],
//!   "children": [{ "nodeType": 3, "name": "#text", "content": "hi" }]
//! }
//! ```

use crate::arena::NodeArena;
use crate::attribute::Attribute;
use crate::error::{DomError, Result};
use crate::node::Node;
use crate::style::Style;
use crate::types::{NodeId, NodeType};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Owned, serializable copy of a node and its descendants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub node_type: NodeType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<Style>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub add_doctype_string: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Validated node plus its validated children, not yet in any arena
struct PendingNode {
    node: Node,
    children: Vec<PendingNode>,
}

impl NodeSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the detached node this snapshot describes (children excluded)
    fn to_node(&self) -> Result<Node> {
        let mut node = Node::new(self.name.clone(), self.content.clone(), self.node_type);

        for attribute in &self.attributes {
            node.set_attribute(attribute.name(), attribute.value())?;
        }
        for class in &self.classes {
            node.add_class(class.as_str())?;
        }
        for style in &self.styles {
            node.add_style(style.clone())?;
        }
        if self.node_type == NodeType::DocumentType {
            node.add_doctype_string(self.add_doctype_string)?;
        }

        Ok(node)
    }

    fn validate(&self) -> Result<PendingNode> {
        if self.node_type.is_leaf() && !self.children.is_empty() {
            return Err(DomError::invalid_node_type(
                "element or document",
                self.node_type,
            ));
        }
        if let Some(child) = self
            .children
            .iter()
            .find(|child| child.node_type == NodeType::Document)
        {
            return Err(DomError::invalid_node_type(
                "element, text, comment or document type",
                child.node_type,
            ));
        }

        Ok(PendingNode {
            node: self.to_node()?,
            children: self
                .children
                .iter()
                .map(NodeSnapshot::validate)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl NodeArena {
    /// Export a node and its subtree
    pub fn snapshot(&self, node_id: NodeId) -> Result<NodeSnapshot> {
        let node = self.get(node_id)?;

        Ok(NodeSnapshot {
            node_type: node.node_type(),
            name: node.name().to_string(),
            content: node.content().map(str::to_string),
            attributes: node.attributes().iter().cloned().collect(),
            classes: node.class_list().iter().map(str::to_string).collect(),
            styles: node.style().iter().cloned().collect(),
            add_doctype_string: node.doctype_string_enabled(),
            children: node
                .children()
                .iter()
                .map(|&child_id| self.snapshot(child_id))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Rebuild a snapshot as a new detached subtree, returns its root ID
    ///
    /// The whole snapshot is validated before anything is created, so a
    /// rejected snapshot leaves the arena untouched.
    pub fn import_snapshot(&mut self, snapshot: &NodeSnapshot) -> Result<NodeId> {
        let pending = snapshot.validate()?;
        let root_id = self.insert_pending(pending)?;
        tracing::debug!(root_id, "[NodeArena] Imported snapshot");
        Ok(root_id)
    }

    fn insert_pending(&mut self, pending: PendingNode) -> Result<NodeId> {
        let node_id = self.create(pending.node);
        for child in pending.children {
            let child_id = self.insert_pending(child)?;
            self.append_child(node_id, child_id)?;
        }
        Ok(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DocumentType;

    fn sample_tree() -> (NodeArena, NodeId) {
        let mut arena = NodeArena::new();
        let document = arena.create(Node::document());
        let doctype = arena.create(DocumentType::new("html").with_doctype_string(false));
        let mut body = Node::element("body");
        body.set_attribute("id", "top").unwrap();
        body.set_attribute("data-x", "\"q\"").unwrap();
        body.add_class("page").unwrap();
        body.set_style("margin", "0").unwrap();
        let body = arena.create(body);
        let text = arena.create(Node::text("hello"));
        let comment = arena.create(Node::comment("c"));

        arena.append_child(document, doctype).unwrap();
        arena.append_child(document, body).unwrap();
        arena.append_child(body, text).unwrap();
        arena.append_child(body, comment).unwrap();
        (arena, document)
    }

    #[test]
    fn test_snapshot_rebuilds_identical_markup() {
        let (arena, document) = sample_tree();
        let snapshot = arena.snapshot(document).unwrap();
        let json = snapshot.to_json().unwrap();

        let mut other = NodeArena::new();
        let rebuilt = other
            .import_snapshot(&NodeSnapshot::from_json(&json).unwrap())
            .unwrap();

        assert_eq!(other.render(rebuilt).unwrap(), arena.render(document).unwrap());
        assert_eq!(other.snapshot(rebuilt).unwrap(), snapshot);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut arena = NodeArena::new();
        let mut div = Node::element("div");
        div.set_attribute("id", "x").unwrap();
        let div = arena.create(div);
        let text = arena.create(Node::text("hi"));
        arena.append_child(div, text).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&arena.snapshot(div).unwrap().to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "nodeType": 1,
                "name": "div",
                "attributes": [{ "name": "id", "value": "x" }],
                "children": [{ "nodeType": 3, "name": "#text", "content": "hi" }]
            })
        );
    }

    #[test]
    fn test_invalid_snapshot_leaves_arena_untouched() {
        let json = serde_json::json!({
            "nodeType": 1,
            "name": "div",
            "children": [
                { "nodeType": 3, "name": "#text", "content": "ok" },
                { "nodeType": 1, "name": "span", "classes": ["two words"] }
            ]
        })
        .to_string();
        let snapshot = NodeSnapshot::from_json(&json).unwrap();

        let mut arena = NodeArena::new();
        let err = arena.import_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, DomError::InvalidItemType(_)));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_leaf_with_children_rejected() {
        let json = r##"{"nodeType":3,"name":"#text","content":"x","children":[{"nodeType":3,"name":"#text"}]}"##;
        let snapshot = NodeSnapshot::from_json(json).unwrap();

        let mut arena = NodeArena::new();
        assert!(matches!(
            arena.import_snapshot(&snapshot),
            Err(DomError::InvalidNodeType { .. })
        ));
    }

    #[test]
    fn test_nested_document_rejected_before_insertion() {
        let json = r##"{"nodeType":1,"name":"body","children":[
            {"nodeType":3,"name":"#text","content":"a"},
            {"nodeType":9,"name":"#document","children":[{"nodeType":10,"name":"html"}]}
        ]}"##;
        let snapshot = NodeSnapshot::from_json(json).unwrap();

        let mut arena = NodeArena::new();
        assert!(matches!(
            arena.import_snapshot(&snapshot),
            Err(DomError::InvalidNodeType { .. })
        ));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            NodeSnapshot::from_json("{\"nodeType\": 99, \"name\": \"x\"}"),
            Err(DomError::Snapshot(_))
        ));
        assert!(NodeSnapshot::from_json("not json").is_err());
    }
}
