//! Arena-based tree storage
//!
//! Every node of a tree lives in one `NodeArena`. Children are held as a
//! list of indices and the parent link is an index too, so the back-edge
//! never owns anything.
//!
//! ```text
//! Arena: Vec<Option<Node>>
//!        [Node0][Node1][None][Node3]...
//!         ↑ 4-byte index, freed slots stay empty
//! ```
//!
//! IDs are `first_id + slot`. `clear` advances `first_id` past every ID
//! handed out so far, so no ID ever names two different nodes.
//!
//! Invariants kept by every mutation here:
//! - `parent_id == Some(p)` exactly when `p.children` contains the node
//! - no node is its own ancestor

use crate::error::{DomError, Result};
use crate::node::Node;
use crate::serializer::DomSerializer;
use crate::types::{NodeId, NodeType};

#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Option<Node>>,
    first_id: NodeId,
    root_id: Option<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            first_id: 0,
            root_id: None,
        }
    }

    /// Move a detached node into the arena, returns its ID
    ///
    /// Tree links carried by `node` are reset; the arena is the only place
    /// they are set.
    pub fn create(&mut self, node: impl Into<Node>) -> NodeId {
        let mut node = node.into();
        node.parent_id = None;
        node.children.clear();

        let node_id = self.first_id + self.nodes.len() as NodeId;
        tracing::trace!(node_id, name = node.name(), "[NodeArena] Created node");
        self.nodes.push(Some(node));
        node_id
    }

    fn slot(&self, node_id: NodeId) -> Option<usize> {
        node_id.checked_sub(self.first_id).map(|slot| slot as usize)
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.slot(node_id)
            .and_then(|slot| self.nodes.get(slot))
            .and_then(Option::as_ref)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.slot(node_id)
            .and_then(|slot| self.nodes.get_mut(slot))
            .and_then(Option::as_mut)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.get(node_id).is_ok()
    }

    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterator over all live node IDs in creation order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(idx, _)| self.first_id + idx as NodeId)
    }

    pub fn parent(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node_id)?.parent_id)
    }

    pub fn children(&self, node_id: NodeId) -> Result<&[NodeId]> {
        Ok(self.get(node_id)?.children())
    }

    /// Check whether `ancestor` is `node_id` itself or above it in the tree
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node_id: NodeId) -> Result<bool> {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.get(id)?.parent_id;
        }
        Ok(false)
    }

    /// Append `child` as the last child of `parent`
    ///
    /// A child that already has a parent is moved. Fails with
    /// `CyclicStructure` when `child` is `parent` or one of its ancestors, and
    /// with `InvalidNodeType` when `parent` is a leaf or `child` is a
    /// document (documents are always roots). On failure nothing
    /// changes.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let parent_type = self.get(parent_id)?.node_type();
        let child_type = self.get(child_id)?.node_type();

        if parent_type.is_leaf() {
            return Err(DomError::invalid_node_type("element or document", parent_type));
        }
        if child_type == NodeType::Document {
            return Err(DomError::invalid_node_type(
                "element, text, comment or document type",
                child_type,
            ));
        }
        if self.is_ancestor_or_self(child_id, parent_id)? {
            tracing::warn!(
                parent_id,
                child_id,
                "[NodeArena] Rejected append that would create a cycle"
            );
            return Err(DomError::CyclicStructure {
                parent: parent_id,
                child: child_id,
            });
        }

        self.detach(child_id)?;
        self.get_mut(parent_id)?.children.append(child_id)?;
        self.get_mut(child_id)?.parent_id = Some(parent_id);

        tracing::trace!(parent_id, child_id, "[NodeArena] Appended child");
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// The child stays in the arena and can be appended elsewhere. Fails with
    /// `NotAChild` when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get(parent_id)?;
        if self.get(child_id)?.parent_id != Some(parent_id) {
            return Err(DomError::NotAChild {
                parent: parent_id,
                child: child_id,
            });
        }

        self.detach(child_id)?;
        tracing::trace!(parent_id, child_id, "[NodeArena] Removed child");
        Ok(())
    }

    /// Unlink a node from its parent, if it has one
    fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let Some(parent_id) = self.get(node_id)?.parent_id else {
            return Ok(());
        };

        let parent = self.get_mut(parent_id)?;
        if let Some(index) = parent.children.position(|&id| id == node_id) {
            parent.children.remove(index);
        }
        self.get_mut(node_id)?.parent_id = None;
        Ok(())
    }

    /// Detach a node and free it together with its whole subtree
    ///
    /// Freed IDs are never handed out again.
    pub fn destroy(&mut self, node_id: NodeId) -> Result<()> {
        self.detach(node_id)?;

        let mut freed = 0usize;
        let mut stack = vec![node_id];
        while let Some(id) = stack.pop() {
            let taken = self
                .slot(id)
                .and_then(|slot| self.nodes.get_mut(slot))
                .and_then(Option::take);
            if let Some(node) = taken {
                stack.extend(node.children.iter().copied());
                freed += 1;
            }
        }

        if self.root_id.is_some_and(|root| !self.contains(root)) {
            self.root_id = None;
        }

        tracing::debug!(node_id, freed, "[NodeArena] Destroyed subtree");
        Ok(())
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(NodeId, &Node) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node_id, node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children().iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Find live nodes matching predicate, in creation order
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| match slot {
                Some(node) if predicate(node) => Some(self.first_id + idx as NodeId),
                _ => None,
            })
            .collect()
    }

    /// Find all elements by tag name (ASCII case-insensitive)
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| node.is_element() && node.name().eq_ignore_ascii_case(tag))
    }

    /// Find element by ID attribute
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(|node| node.node_type() == NodeType::Element && node.id() == Some(id))
            .into_iter()
            .next()
    }

    /// Concatenated text content of a node and its descendants
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();

        self.traverse_df(node_id, |_, node| {
            if node.is_text() {
                text.push_str(node.content().unwrap_or_default());
            }
            Ok(())
        })?;

        Ok(text)
    }

    /// Render a node and its subtree with the default serializer settings
    pub fn render(&self, node_id: NodeId) -> Result<String> {
        DomSerializer::new().serialize(self, node_id)
    }

    /// Clear arena (reuse allocation)
    ///
    /// Every ID handed out before stays invalid; new IDs continue after them.
    pub fn clear(&mut self) {
        self.first_id += self.nodes.len() as NodeId;
        self.nodes.clear();
        self.root_id = None;
    }
}
