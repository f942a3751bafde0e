//! Tree node and its closed leaf variants
//!
//! A `Node` is created detached and becomes part of a tree once handed to a
//! [`NodeArena`](crate::arena::NodeArena), which owns it from then on. Tree
//! links (`parent_id`, `children`) are only ever changed by the arena.
//!
//! `class` and `style` are not stored as plain attributes: setting them
//! routes into the class list and style list, and the serializer renders
//! those lists back as attributes after the regular ones.

use crate::attribute::{Attribute, AttributeMap};
use crate::class_list::ClassCollection;
use crate::collection::Collection;
use crate::error::{DomError, Result};
use crate::style::{Style, StyleCollection};
use crate::types::{NodeId, NodeType, COMMENT_NODE_NAME, DOCUMENT_NODE_NAME, TEXT_NODE_NAME};
use std::borrow::Cow;

/// The main tree node structure
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    content: Option<String>,
    node_type: NodeType,

    attributes: AttributeMap,
    class_list: ClassCollection,
    style: StyleCollection,

    // Navigation, maintained by the arena
    pub(crate) parent_id: Option<NodeId>,
    pub(crate) children: Collection<NodeId>,

    // Document type only
    add_doctype_string: bool,
}

impl Node {
    /// Create a detached node
    pub fn new(name: impl Into<String>, content: Option<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            content,
            node_type,
            attributes: AttributeMap::new(),
            class_list: ClassCollection::new(),
            style: StyleCollection::new(),
            parent_id: None,
            children: Collection::new(),
            add_doctype_string: true,
        }
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(tag, None, NodeType::Element)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Text::new(content).into()
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Comment::new(content).into()
    }

    pub fn document_type(name: impl Into<String>) -> Self {
        DocumentType::new(name).into()
    }

    pub fn document() -> Self {
        Self::new(DOCUMENT_NODE_NAME, None, NodeType::Document)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.is_element() {
            Some(&self.name)
        } else {
            None
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Replace the character content of a text or comment node
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<()> {
        if !self.node_type.has_content() {
            return Err(DomError::invalid_node_type("text or comment", self.node_type));
        }
        self.content = Some(content.into());
        Ok(())
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn children(&self) -> &[NodeId] {
        self.children.as_slice()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn ensure_element(&self) -> Result<()> {
        if self.is_element() {
            Ok(())
        } else {
            Err(DomError::invalid_node_type("element", self.node_type))
        }
    }

    /// Set an attribute, replacing any existing one of the same name
    ///
    /// `class` and `style` replace the class list and style list with the
    /// tokens or declarations parsed from `value`.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.ensure_element()?;
        let value = value.into();

        if name.eq_ignore_ascii_case("class") {
            self.class_list.set_from_str(&value)
        } else if name.eq_ignore_ascii_case("style") {
            self.style.set_from_str(&value)
        } else {
            self.attributes.set(name, value)
        }
    }

    /// Get an attribute value
    ///
    /// `class` and `style` are rendered from their lists and are absent when
    /// the list is empty.
    pub fn get_attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        if name.eq_ignore_ascii_case("class") {
            (!self.class_list.is_empty()).then(|| Cow::Owned(self.class_value()))
        } else if name.eq_ignore_ascii_case("style") {
            (!self.style.is_empty()).then(|| Cow::Owned(self.style_value()))
        } else {
            self.attributes.value(name).map(Cow::Borrowed)
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Remove an attribute, returning whether anything was removed
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        if name.eq_ignore_ascii_case("class") {
            let had = !self.class_list.is_empty();
            self.class_list.clear();
            had
        } else if name.eq_ignore_ascii_case("style") {
            let had = !self.style.is_empty();
            self.style.clear();
            had
        } else {
            self.attributes.remove(name).is_some()
        }
    }

    /// Regular attributes in insertion order (class and style excluded)
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// The `id` attribute value, if set
    pub fn id(&self) -> Option<&str> {
        self.attributes.id().map(Attribute::value)
    }

    pub fn add_class(&mut self, token: impl Into<String>) -> Result<()> {
        self.ensure_element()?;
        self.class_list.add(token)
    }

    pub fn remove_class(&mut self, token: &str) -> bool {
        self.class_list.remove(token)
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.class_list.contains(token)
    }

    pub fn class_list(&self) -> &ClassCollection {
        &self.class_list
    }

    /// Append a style declaration as-is
    pub fn add_style(&mut self, style: Style) -> Result<()> {
        self.ensure_element()?;
        self.style.add(style)
    }

    /// Set one style property, replacing an earlier declaration of it
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) -> Result<()> {
        self.ensure_element()?;
        self.style.set(property, value)
    }

    pub fn remove_style(&mut self, property: &str) -> bool {
        self.style.remove(property)
    }

    pub fn style(&self) -> &StyleCollection {
        &self.style
    }

    /// Space-joined class list
    pub fn class_value(&self) -> String {
        self.class_list.iter().collect::<Vec<_>>().join(" ")
    }

    /// Space-joined style declarations
    pub fn style_value(&self) -> String {
        self.style
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Choose between `<!DOCTYPE name>` and bare `name` output
    pub fn add_doctype_string(&mut self, option: bool) -> Result<()> {
        if self.node_type != NodeType::DocumentType {
            return Err(DomError::invalid_node_type("document type", self.node_type));
        }
        self.add_doctype_string = option;
        Ok(())
    }

    pub fn doctype_string_enabled(&self) -> bool {
        self.add_doctype_string
    }
}

/// Read/write access to the character content of a leaf
pub trait TrivialNode {
    fn set_content(&mut self, content: impl Into<String>);
    fn content(&self) -> &str;
}

/// Text leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl TrivialNode for Text {
    fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::new(TEXT_NODE_NAME, Some(text.content), NodeType::Text)
    }
}

/// Comment leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    content: String,
}

impl Comment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl TrivialNode for Comment {
    fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::new(COMMENT_NODE_NAME, Some(comment.content), NodeType::Comment)
    }
}

/// Document type declaration leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType {
    name: String,
    add_doctype_string: bool,
}

impl DocumentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            add_doctype_string: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_doctype_string(&mut self, option: bool) {
        self.add_doctype_string = option;
    }

    /// Builder form of [`DocumentType::add_doctype_string`]
    pub fn with_doctype_string(mut self, option: bool) -> Self {
        self.add_doctype_string = option;
        self
    }
}

impl From<DocumentType> for Node {
    fn from(doctype: DocumentType) -> Self {
        let mut node = Node::new(doctype.name, None, NodeType::DocumentType);
        node.add_doctype_string = doctype.add_doctype_string;
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_replaces() {
        let mut div = Node::element("div");
        div.set_attribute("id", "a").unwrap();
        div.set_attribute("id", "b").unwrap();

        assert_eq!(div.attributes().count(), 1);
        assert_eq!(div.get_attribute("id").as_deref(), Some("b"));
        assert_eq!(div.id(), Some("b"));
    }

    #[test]
    fn test_class_attribute_routes_to_list() {
        let mut div = Node::element("div");
        div.add_class("card").unwrap();
        div.set_attribute("class", "one two").unwrap();

        assert!(!div.has_class("card"));
        assert!(div.has_class("two"));
        assert!(div.attributes().is_empty());
        assert_eq!(div.get_attribute("CLASS").as_deref(), Some("one two"));

        assert!(div.remove_attribute("class"));
        assert!(!div.has_attribute("class"));
        assert!(!div.remove_attribute("class"));
    }

    #[test]
    fn test_style_attribute_routes_to_list() {
        let mut div = Node::element("div");
        div.set_attribute("style", "color: red; margin: 0").unwrap();
        div.set_style("color", "blue").unwrap();
        div.add_style(Style::new("padding", "1px")).unwrap();

        assert_eq!(
            div.get_attribute("style").as_deref(),
            Some("color: blue; margin: 0; padding: 1px;")
        );
        assert!(div.remove_style("margin"));
        assert_eq!(div.style().count(), 2);
    }

    #[test]
    fn test_leaves_reject_element_operations() {
        let mut text = Node::text("hi");
        assert!(matches!(
            text.set_attribute("id", "x"),
            Err(DomError::InvalidNodeType { .. })
        ));
        assert!(text.add_class("c").is_err());
        assert!(text.set_style("color", "red").is_err());
        assert!(text.add_doctype_string(false).is_err());
        assert!(text.attributes().is_empty());
    }

    #[test]
    fn test_text_variant() {
        let mut text = Text::new("first");
        text.set_content("second");
        assert_eq!(TrivialNode::content(&text), "second");

        let mut node: Node = text.into();
        assert_eq!(node.name(), "#text");
        assert_eq!(node.node_type(), NodeType::Text);
        assert_eq!(node.content(), Some("second"));

        node.set_content("third").unwrap();
        assert_eq!(node.content(), Some("third"));
    }

    #[test]
    fn test_set_content_only_on_text_like() {
        let mut div = Node::element("div");
        assert!(div.set_content("nope").is_err());
        assert_eq!(div.content(), None);

        let mut comment = Node::comment("note");
        comment.set_content("changed").unwrap();
        assert_eq!(comment.name(), "#comment");
        assert_eq!(comment.content(), Some("changed"));
    }

    #[test]
    fn test_document_type_variant() {
        let node: Node = DocumentType::new("html").with_doctype_string(false).into();
        assert_eq!(node.name(), "html");
        assert!(!node.doctype_string_enabled());

        let mut node = Node::document_type("html");
        assert!(node.doctype_string_enabled());
        node.add_doctype_string(false).unwrap();
        assert!(!node.doctype_string_enabled());
    }

    #[test]
    fn test_generic_constructor_keeps_type() {
        let node = Node::new("custom", Some("x".to_string()), NodeType::Text);
        assert_eq!(node.node_type(), NodeType::Text);
        assert_eq!(node.name(), "custom");
        assert_eq!(node.tag_name(), None);
        assert_eq!(Node::element("p").tag_name(), Some("p"));
    }
}
