//! Quiz cart: activities picked for a quiz, owned by whoever constructs it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub section_path: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizCart {
    items: Vec<CartItem>,
}

impl QuizCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns `false` if an item with the same id is present.
    pub fn add(&mut self, item: CartItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<CartItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
