//! Markup serializer
//!
//! Renders a node and its subtree to a string:
//! - elements as `<tag attrs>children</tag>`, attributes in insertion order,
//!   then `class`, then `style`
//! - text verbatim (or escaped when configured)
//! - comments as `<!--content-->`, with any `-->` inside defused
//! - document types as `<!DOCTYPE name>` or the bare name
//! - documents as the concatenation of their children
//!
//! The default configuration is compact and byte-exact; pretty mode is for
//! humans only.

use crate::arena::NodeArena;
use crate::attribute::Attribute;
use crate::error::Result;
use crate::node::Node;
use crate::types::{NodeId, NodeType};
use crate::utils;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Put every node on its own indented line
    pub pretty: bool,
    /// Indentation unit for pretty output
    pub indent: String,
    /// Escape `&`, `<` and `>` in text nodes (text is emitted as-is otherwise)
    pub escape_text: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            escape_text: false,
        }
    }
}

impl SerializerConfig {
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set the indentation unit (implies pretty output)
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self.pretty = true;
        self
    }

    pub fn escape_text(mut self) -> Self {
        self.escape_text = true;
        self
    }
}

/// Tree serializer
#[derive(Debug, Clone, Default)]
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a node and its subtree
    pub fn serialize(&self, arena: &NodeArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.serialize_node(arena, node_id, 0, &mut output)?;

        if self.config.pretty && output.ends_with('\n') {
            output.pop();
        }
        Ok(output)
    }

    /// Serialize the arena's root node, or nothing if no root is set
    pub fn serialize_root(&self, arena: &NodeArena) -> Result<String> {
        match arena.root_id() {
            Some(root_id) => self.serialize(arena, root_id),
            None => Ok(String::new()),
        }
    }

    fn serialize_node(
        &self,
        arena: &NodeArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;

        match node.node_type() {
            NodeType::Element => {
                self.write_indent(depth, output);
                output.push('<');
                output.push_str(node.name());
                write_attributes(node, output);
                output.push('>');
                self.write_newline(output);

                for &child_id in node.children() {
                    self.serialize_node(arena, child_id, depth + 1, output)?;
                }

                self.write_indent(depth, output);
                output.push_str("</");
                output.push_str(node.name());
                output.push('>');
                self.write_newline(output);
            }
            NodeType::Text => {
                let content = node.content().unwrap_or_default();
                let content = if self.config.pretty {
                    content.trim()
                } else {
                    content
                };
                if self.config.pretty && content.is_empty() {
                    return Ok(());
                }

                self.write_indent(depth, output);
                if self.config.escape_text {
                    output.push_str(&utils::escape_text(content));
                } else {
                    output.push_str(content);
                }
                self.write_newline(output);
            }
            NodeType::Comment => {
                self.write_indent(depth, output);
                output.push_str("<!--");
                output.push_str(&utils::escape_comment(node.content().unwrap_or_default()));
                output.push_str("-->");
                self.write_newline(output);
            }
            NodeType::DocumentType => {
                self.write_indent(depth, output);
                if node.doctype_string_enabled() {
                    output.push_str("<!DOCTYPE ");
                    output.push_str(node.name());
                    output.push('>');
                } else {
                    output.push_str(node.name());
                }
                self.write_newline(output);
            }
            NodeType::Document => {
                // Documents have no markup of their own
                for &child_id in node.children() {
                    self.serialize_node(arena, child_id, depth, output)?;
                }
            }
        }

        Ok(())
    }

    fn write_indent(&self, depth: usize, output: &mut String) {
        if self.config.pretty {
            for _ in 0..depth {
                output.push_str(&self.config.indent);
            }
        }
    }

    fn write_newline(&self, output: &mut String) {
        if self.config.pretty {
            output.push('\n');
        }
    }
}

fn write_attributes(node: &Node, output: &mut String) {
    for attribute in node.attributes() {
        output.push(' ');
        output.push_str(&attribute.to_string());
    }
    if !node.class_list().is_empty() {
        output.push(' ');
        output.push_str(&Attribute::new("class", node.class_value()).to_string());
    }
    if !node.style().is_empty() {
        output.push(' ');
        output.push_str(&Attribute::new("style", node.style_value()).to_string());
    }
}
