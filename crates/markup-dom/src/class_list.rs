//! Class token list
//!
//! An ordered set of class tokens. Adding a token that is already present
//! succeeds without storing it twice.

use crate::collection::Collection;
use crate::error::{DomError, Result};
use crate::utils;

#[allow(clippy::ptr_arg)]
fn check_token(token: &String) -> Result<()> {
    if utils::is_class_token(token) {
        Ok(())
    } else {
        Err(DomError::invalid_item(format!(
            "item must be a single class token, got {:?}",
            token
        )))
    }
}

#[derive(Debug, Clone)]
pub struct ClassCollection {
    tokens: Collection<String>,
}

impl ClassCollection {
    pub fn new() -> Self {
        Self {
            tokens: Collection::guarded(check_token),
        }
    }

    /// Add a class token at the end unless already present
    pub fn add(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.tokens.check(&token)?;
        if self.tokens.contains(&token) {
            return Ok(());
        }
        self.tokens.add(token)
    }

    /// Same as [`ClassCollection::add`]
    pub fn append(&mut self, token: impl Into<String>) -> Result<()> {
        self.add(token)
    }

    /// Replace the whole list with the whitespace-separated tokens of `value`
    ///
    /// Either every token is accepted or the list is left untouched.
    pub fn set_from_str(&mut self, value: &str) -> Result<()> {
        let mut tokens = Collection::guarded(check_token);
        for token in value.split_ascii_whitespace() {
            if !tokens.contains(&token.to_string()) {
                tokens.add(token.to_string())?;
            }
        }
        self.tokens = tokens;
        Ok(())
    }

    /// Remove a token, returning whether it was present
    pub fn remove(&mut self, token: &str) -> bool {
        match self.tokens.position(|existing| existing == token) {
            Some(index) => self.tokens.remove(index).is_some(),
            None => false,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|existing| existing == token)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn count(&self) -> usize {
        self.tokens.count()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

impl Default for ClassCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order() {
        let mut classes = ClassCollection::new();
        classes.add("nav").unwrap();
        classes.append("active").unwrap();
        classes.add(String::from("wide")).unwrap();

        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["nav", "active", "wide"]);
        assert_eq!(classes.get(1), Some("active"));
    }

    #[test]
    fn test_rejects_non_tokens() {
        let mut classes = ClassCollection::new();
        classes.add("ok").unwrap();

        for bad in ["", "two words", "tab\tbed", " "] {
            let err = classes.add(bad).unwrap_err();
            assert!(matches!(err, DomError::InvalidItemType(_)));
            let err = classes.append(bad).unwrap_err();
            assert!(matches!(err, DomError::InvalidItemType(_)));
            assert_eq!(classes.count(), 1);
        }
        assert_eq!(classes.get(0), Some("ok"));
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let mut classes = ClassCollection::new();
        classes.add("a").unwrap();
        classes.add("b").unwrap();
        classes.add("a").unwrap();
        classes.add("A").unwrap();

        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["a", "b", "A"]);
    }

    #[test]
    fn test_remove() {
        let mut classes = ClassCollection::new();
        classes.add("a").unwrap();
        classes.add("b").unwrap();

        assert!(classes.remove("a"));
        assert!(!classes.remove("a"));
        assert!(!classes.contains("a"));
        assert!(classes.contains("b"));
        assert_eq!(classes.count(), 1);
    }

    #[test]
    fn test_set_from_str() {
        let mut classes = ClassCollection::new();
        classes.add("old").unwrap();

        classes.set_from_str("  one two\tone  three ").unwrap();
        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["one", "two", "three"]);

        classes.set_from_str("").unwrap();
        assert!(classes.is_empty());
    }
}
