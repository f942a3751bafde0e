//! Element attributes
//!
//! `Attribute` is a plain name/value pair. `AttributeMap` keeps a node's
//! attributes in insertion order and unique by name (ASCII
//! case-insensitive), with a side index for O(1) lookup.

use crate::collection::Collection;
use crate::error::{DomError, Result};
use crate::utils;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single name/value attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Check if this is the `id` attribute (any case)
    pub fn is_id(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }
}

/// Renders `name="value"` with `"` in the value escaped as `&quot;`
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}=\"{}\"",
            self.name,
            utils::escape_attribute_value(&self.value)
        )
    }
}

fn check_attribute(attribute: &Attribute) -> Result<()> {
    if utils::is_valid_attribute_name(&attribute.name) {
        Ok(())
    } else {
        Err(DomError::invalid_item(format!(
            "attribute name {:?} is not a valid name",
            attribute.name
        )))
    }
}

fn index_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Ordered attribute set, unique by name
#[derive(Debug, Clone)]
pub struct AttributeMap {
    attributes: Collection<Attribute>,
    by_name: AHashMap<String, usize>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            attributes: Collection::guarded(check_attribute),
            by_name: AHashMap::new(),
        }
    }

    /// Set an attribute, replacing the value of an existing one with the
    /// same name
    ///
    /// A replaced attribute keeps its position and its original spelling.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let attribute = Attribute::new(name, value);
        match self.by_name.get(&index_key(name)) {
            Some(&index) => {
                self.attributes.check(&attribute)?;
                self.attributes
                    .update(index, |existing| existing.value = attribute.value)?;
            }
            None => {
                self.attributes.add(attribute)?;
                self.by_name
                    .insert(index_key(name), self.attributes.count() - 1);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.by_name
            .get(&index_key(name))
            .and_then(|&index| self.attributes.get(index))
    }

    /// Get an attribute value by name
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Attribute::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&index_key(name))
    }

    /// Remove an attribute by name, returning it if it was present
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let index = self.by_name.remove(&index_key(name))?;
        let removed = self.attributes.remove(index)?;

        // Later attributes shifted down by one
        for slot in self.by_name.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }

        Some(removed)
    }

    /// The `id` attribute, if any
    pub fn id(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.is_id())
    }

    pub fn count(&self) -> usize {
        self.attributes.count()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate attributes in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn clear(&mut self) {
        self.attributes.clear();
        self.by_name.clear();
    }
}

impl Default for AttributeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
