//! Product catalog and listing filters.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::placeholder_image;
use crate::types::{Price, ProductId};
use crate::wishlist::Wishlist;

/// Category value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// A product offered in the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// The product image, or the generated placeholder.
    #[must_use]
    pub fn image_url(&self) -> String {
        self.image
            .clone()
            .unwrap_or_else(|| placeholder_image(&self.name))
    }
}

/// Listing filter: category, free-text search and wishlist-only view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// `"all"`, empty, or a category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive substring of name or description.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub wishlist_only: bool,
}

impl ProductFilter {
    fn matches_category(&self, product: &Product) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("" | ALL_CATEGORIES) => true,
            Some(category) => product.category == category,
        }
    }

    fn normalized_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
    }
}

fn matches_search(needle: Option<&str>, product: &Product) -> bool {
    needle.is_none_or(|needle| {
        product.name.to_lowercase().contains(needle)
            || product.description.to_lowercase().contains(needle)
    })
}

/// Products in display order, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|product| product.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Products passing every predicate of `filter`, in catalog order.
    #[must_use]
    pub fn filter<'a>(&'a self, filter: &ProductFilter, wishlist: &Wishlist) -> Vec<&'a Product> {
        let needle = filter.normalized_search();
        self.products
            .iter()
            .filter(|product| filter.matches_category(product))
            .filter(|product| matches_search(needle.as_deref(), product))
            .filter(|product| !filter.wishlist_only || wishlist.contains(product.id))
            .collect()
    }
}
