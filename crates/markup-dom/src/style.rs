//! Inline style declarations
//!
//! A `Style` is one `property: value;` declaration. `StyleCollection` holds a
//! node's declarations in order; a declaration that would break out of the
//! `style="..."` attribute is rejected at insertion.

use crate::collection::Collection;
use crate::error::{DomError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single style declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    property: String,
    value: String,
}

impl Style {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Build a declaration from `property: value` text
    ///
    /// A trailing `;` and surrounding whitespace are ignored.
    pub fn parse(declaration: &str) -> Result<Self> {
        let declaration = declaration.trim().trim_end_matches(';');
        let (property, value) = declaration.split_once(':').ok_or_else(|| {
            DomError::invalid_item(format!(
                "style declaration {:?} has no ':' separator",
                declaration
            ))
        })?;

        let style = Self::new(property.trim(), value.trim());
        check_style(&style)?;
        Ok(style)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Renders `property: value;`
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

fn check_style(style: &Style) -> Result<()> {
    let property_ok = !style.property.is_empty()
        && !style
            .property
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ':' | ';' | '"'));
    let value_ok = !style.value.contains([';', '"']);

    if property_ok && value_ok {
        Ok(())
    } else {
        Err(DomError::invalid_item(format!(
            "item must be a valid style declaration, got {:?}",
            style.to_string()
        )))
    }
}

#[derive(Debug, Clone)]
pub struct StyleCollection {
    styles: Collection<Style>,
}

impl StyleCollection {
    pub fn new() -> Self {
        Self {
            styles: Collection::guarded(check_style),
        }
    }

    /// Append a declaration
    pub fn add(&mut self, style: Style) -> Result<()> {
        self.styles.add(style)
    }

    /// Same as [`StyleCollection::add`]
    pub fn append(&mut self, style: Style) -> Result<()> {
        self.styles.append(style)
    }

    /// Set `property`, replacing an existing declaration in place
    pub fn set(&mut self, property: &str, value: impl Into<String>) -> Result<()> {
        let style = Style::new(property, value);
        match self.styles.position(|existing| existing.property == property) {
            Some(index) => self.styles.replace(index, style).map(|_| ()),
            None => self.styles.add(style),
        }
    }

    /// Replace every declaration with those parsed from `p: v; q: w` text
    ///
    /// Either every declaration is accepted or the list is left untouched.
    pub fn set_from_str(&mut self, text: &str) -> Result<()> {
        let mut styles = StyleCollection::new();
        for declaration in text.split(';').filter(|d| !d.trim().is_empty()) {
            let style = Style::parse(declaration)?;
            styles.set(&style.property, style.value)?;
        }
        *self = styles;
        Ok(())
    }

    /// Value of `property`, if declared
    pub fn get(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|style| style.property == property)
            .map(Style::value)
    }

    /// Remove the declaration for `property`, returning whether it existed
    pub fn remove(&mut self, property: &str) -> bool {
        match self.styles.position(|style| style.property == property) {
            Some(index) => self.styles.remove(index).is_some(),
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.styles.count()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    pub fn clear(&mut self) {
        self.styles.clear();
    }
}

impl Default for StyleCollection {
    fn default() -> Self {
        Self::new()
    }
}
