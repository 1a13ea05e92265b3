//! Favorited product ids.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Set of product ids the shopper marked as favorite.
///
/// Stored as a list of integers. [`Wishlist::toggle`] never creates a
/// duplicate, but a list edited outside the shop may contain some; they are
/// tolerated and all removed together on the next toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Flip membership of `id` and return the new membership.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            self.ids.retain(|member| *member != id);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Members in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl FromIterator<ProductId> for Wishlist {
    fn from_iter<T: IntoIterator<Item = ProductId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.toggle(ProductId::new(5)));
        assert!(wishlist.contains(ProductId::new(5)));
        assert!(!wishlist.toggle(ProductId::new(5)));
        assert!(!wishlist.contains(ProductId::new(5)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle_removes_tampered_duplicates() {
        let mut wishlist: Wishlist = serde_json::from_str("[3, 4, 3]").unwrap();
        assert_eq!(wishlist.len(), 3);

        assert!(!wishlist.toggle(ProductId::new(3)));
        assert_eq!(wishlist.iter().collect::<Vec<_>>(), vec![ProductId::new(4)]);
    }

    #[test]
    fn test_storage_layout() {
        let wishlist: Wishlist = [ProductId::new(2), ProductId::new(9)].into_iter().collect();
        assert_eq!(serde_json::to_string(&wishlist).unwrap(), "[2,9]");
    }
}
