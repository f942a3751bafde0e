//! Ordered, validated containers
//!
//! A `Collection<T>` keeps items in insertion order and runs an optional
//! guard before anything is stored. Specialized collections (classes,
//! styles, attributes) wrap one and supply their own guard.
//!
//! ```text
//! add(item) → guard(&item)? → push
//!                 ↓ Err
//!           InvalidItemType (nothing stored)
//! ```

use crate::error::Result;
use smallvec::SmallVec;
use std::fmt;

/// Insertion-time predicate. Returns `InvalidItemType` to reject an item.
pub type Guard<T> = fn(&T) -> Result<()>;

/// Ordered container of homogeneous items
///
/// Storage is inline for up to 4 items; most nodes carry fewer than that.
#[derive(Clone)]
pub struct Collection<T> {
    items: SmallVec<[T; 4]>,
    guard: Option<Guard<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

impl<T> Collection<T> {
    /// Create an empty collection that accepts every item
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
            guard: None,
        }
    }

    /// Create an empty collection whose insertions are checked by `guard`
    pub fn guarded(guard: Guard<T>) -> Self {
        Self {
            items: SmallVec::new(),
            guard: Some(guard),
        }
    }

    /// Run the guard without storing anything
    pub fn check(&self, item: &T) -> Result<()> {
        match self.guard {
            Some(guard) => guard(item),
            None => Ok(()),
        }
    }

    /// Validate `item` and append it to the end
    pub fn add(&mut self, item: T) -> Result<()> {
        self.check(&item)?;
        self.items.push(item);
        Ok(())
    }

    /// Same as [`Collection::add`]
    pub fn append(&mut self, item: T) -> Result<()> {
        self.add(item)
    }

    /// Validate `item` and store it in place of the item at `index`
    ///
    /// Returns the replaced item, or `None` (and stores nothing) when `index`
    /// is out of bounds.
    pub fn replace(&mut self, index: usize, item: T) -> Result<Option<T>> {
        self.check(&item)?;
        Ok(self
            .items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, item)))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Remove the item at `index`, shifting later items down
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Index of the first item matching `predicate`
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> Collection<T> {
    /// Modify the item at `index` through `f`, keeping the result only if
    /// the guard accepts it
    ///
    /// Returns `false` when `index` is out of bounds.
    pub fn update<F>(&mut self, index: usize, f: F) -> Result<bool>
    where
        F: FnOnce(&mut T),
    {
        let Some(mut item) = self.items.get(index).cloned() else {
            return Ok(false);
        };
        f(&mut item);
        self.check(&item)?;
        self.items[index] = item;
        Ok(true)
    }
}

impl<T: PartialEq> Collection<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomError;

    fn even_only(item: &u32) -> Result<()> {
        if item % 2 == 0 {
            Ok(())
        } else {
            Err(DomError::InvalidItemType("item must be even".to_string()))
        }
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut collection = Collection::new();
        for word in ["delta", "alpha", "charlie", "bravo", "echo", "alpha"] {
            collection.add(word).unwrap();
        }

        let collected: Vec<_> = collection.iter().copied().collect();
        assert_eq!(
            collected,
            vec!["delta", "alpha", "charlie", "bravo", "echo", "alpha"]
        );
        assert_eq!(collection.count(), 6);

        // Iteration is restartable
        let again: Vec<_> = (&collection).into_iter().copied().collect();
        assert_eq!(collected, again);
    }

    #[test]
    fn test_guard_rejects_without_mutation() {
        let mut collection = Collection::guarded(even_only);
        collection.add(2).unwrap();
        collection.append(4).unwrap();

        let err = collection.add(3).unwrap_err();
        assert!(matches!(err, DomError::InvalidItemType(_)));
        let err = collection.append(5).unwrap_err();
        assert!(matches!(err, DomError::InvalidItemType(_)));

        assert_eq!(collection.count(), 2);
        assert_eq!(collection.as_slice(), &[2, 4]);
    }

    #[test]
    fn test_get_and_remove() {
        let mut collection = Collection::new();
        collection.add('a').unwrap();
        collection.add('b').unwrap();
        collection.add('c').unwrap();

        assert_eq!(collection.get(1), Some(&'b'));
        assert_eq!(collection.remove(1), Some('b'));
        assert_eq!(collection.remove(7), None);
        assert_eq!(collection.as_slice(), &['a', 'c']);
        assert_eq!(collection.position(|c| *c == 'c'), Some(1));
        assert!(collection.contains(&'a'));
    }

    #[test]
    fn test_replace_is_guarded() {
        let mut collection = Collection::guarded(even_only);
        collection.add(2).unwrap();

        assert_eq!(collection.replace(0, 8).unwrap(), Some(2));
        assert!(collection.replace(0, 9).is_err());
        assert_eq!(collection.replace(3, 10).unwrap(), None);
        assert_eq!(collection.as_slice(), &[8]);
    }

    #[test]
    fn test_update_cannot_store_rejected_item() {
        let mut collection = Collection::guarded(even_only);
        collection.add(2).unwrap();

        let err = collection.update(0, |item| *item = 3).unwrap_err();
        assert!(matches!(err, DomError::InvalidItemType(_)));
        assert_eq!(collection.as_slice(), &[2]);

        assert!(collection.update(0, |item| *item += 4).unwrap());
        assert!(!collection.update(5, |item| *item = 8).unwrap());
        assert_eq!(collection.as_slice(), &[6]);
        assert!(collection.iter().all(|item| collection.check(item).is_ok()));
    }

    #[test]
    fn test_grows_past_inline_capacity() {
        let mut collection = Collection::new();
        for i in 0..10 {
            collection.add(i).unwrap();
        }
        assert_eq!(collection.count(), 10);
        assert_eq!(collection.iter().sum::<i32>(), 45);
    }
}
