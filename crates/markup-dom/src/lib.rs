//! Markup tree model
//!
//! Build a tree of elements, text, comments and document type declarations,
//! then render it back to an HTML/XML-like string. Nothing here parses
//! markup; trees are only ever built through the API (or rebuilt from a JSON
//! snapshot).
//!
//! ## Core Design
//!
//! ```text
//! Node (detached) → NodeArena::create → NodeId (u32)
//!                          ↓
//!            append_child / remove_child / destroy
//!                          ↓
//!                DomSerializer → markup string
//! ```
//!
//! Collections validate on insertion and never after: a rejected item is
//! reported as [`DomError::InvalidItemType`] and nothing is stored. Tree
//! mutations that would make a node its own ancestor fail with
//! [`DomError::CyclicStructure`].
//!
//! ```
//! use markup_dom::{Node, NodeArena, Text};
//!
//! let mut arena = NodeArena::new();
//! let mut div = Node::element("div");
//! div.set_attribute("id", "x").unwrap();
//! let div = arena.create(div);
//! let text = arena.create(Text::new("hi"));
//! arena.append_child(div, text).unwrap();
//!
//! assert_eq!(arena.render(div).unwrap(), r#"<div id="x">hi</div>"#);
//! ```

pub mod arena;
pub mod attribute;
pub mod class_list;
pub mod collection;
pub mod error;
pub mod node;
pub mod serializer;
pub mod snapshot;
pub mod style;
pub mod types;
pub mod utils;

pub use arena::NodeArena;
pub use attribute::{Attribute, AttributeMap};
pub use class_list::ClassCollection;
pub use collection::{Collection, Guard};
pub use error::{DomError, Result};
pub use node::{Comment, DocumentType, Node, Text, TrivialNode};
pub use serializer::{DomSerializer, SerializerConfig};
pub use snapshot::NodeSnapshot;
pub use style::{Style, StyleCollection};
pub use types::*;
