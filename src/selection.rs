//! User selection of items to rank
//!
//! The boundary where duplicate ids and too-small selections are rejected
//! before anything reaches the ranking engine.

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::ranking::traits::Rankable;

/// Smallest selection that can be ranked
pub const MIN_RANKABLE: usize = 2;

/// Ordered set of selected items, unique by id
///
/// Serializes as a plain array; deserializing re-checks for duplicate ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<T>",
    into = "Vec<T>",
    bound(
        serialize = "T: Serialize + Rankable",
        deserialize = "T: for<'a> Deserialize<'a> + Rankable"
    )
)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Rankable> Selection<T> {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from items, rejecting duplicates
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Result<Self, SelectionError> {
        let mut selection = Self::new();
        for item in items {
            selection.select(item)?;
        }
        Ok(selection)
    }

    /// Add an item
    pub fn select(&mut self, item: T) -> Result<(), SelectionError> {
        if self.contains(item.id()) {
            return Err(SelectionError::Duplicate(item.id().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by id
    pub fn deselect(&mut self, id: &str) -> Result<T, SelectionError> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| SelectionError::NotSelected(id.to_string()))?;
        Ok(self.items.remove(pos))
    }

    /// Select the item if absent, deselect it if present
    ///
    /// Returns `true` if the item is selected afterwards.
    pub fn toggle(&mut self, item: T) -> bool {
        if self.deselect(item.id()).is_ok() {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Check whether an item with `id` is selected
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id() == id)
    }

    /// Selected items in selection order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of selected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if the selection is large enough to rank
    pub fn is_rankable(&self) -> bool {
        self.items.len() >= MIN_RANKABLE
    }

    /// Fail unless the selection is large enough to rank
    pub fn ensure_rankable(&self) -> Result<(), SelectionError> {
        if self.is_rankable() {
            Ok(())
        } else {
            Err(SelectionError::TooFew {
                required: MIN_RANKABLE,
                actual: self.items.len(),
            })
        }
    }

    /// Drop every selected item
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Rankable> TryFrom<Vec<T>> for Selection<T> {
    type Error = SelectionError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl<T> From<Selection<T>> for Vec<T> {
    fn from(selection: Selection<T>) -> Self {
        selection.items
    }
}
