//! Product listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{OriginalUri, Query, State};
use lantern_core::ProductFilter;
use lantern_core::catalog::ALL_CATEGORIES;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::ShopSession;
use crate::routes::page::{PageChrome, ProductCardView, ProductGrid};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    /// `1` shows wishlisted products only.
    pub wishlist: Option<String>,
}

impl ProductQuery {
    fn wishlist_only(&self) -> bool {
        matches!(self.wishlist.as_deref(), Some("1" | "true" | "on"))
    }

    fn to_filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone(),
            search: self.q.clone(),
            wishlist_only: self.wishlist_only(),
        }
    }
}

/// An entry of the category select.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub chrome: PageChrome,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub wishlist_only: bool,
    pub return_to: String,
}

/// Display the product listing, filtered by category, search term and
/// wishlist membership.
#[instrument(skip(state, shop, uri))]
pub async fn index(
    State(state): State<AppState>,
    shop: ShopSession,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProductQuery>,
) -> Result<ProductsIndexTemplate> {
    let flash = shop.take_flash().await?;
    let catalog = state.catalog();
    let filter = query.to_filter();

    let matches = catalog.filter(&filter, shop.shop().wishlist());
    tracing::debug!(count = matches.len(), "Products filtered");
    let products = ProductGrid::build(matches, shop.shop(), flash.added);

    let selected = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .unwrap_or(ALL_CATEGORIES);
    let categories = std::iter::once(ALL_CATEGORIES)
        .chain(catalog.categories())
        .map(|value| CategoryOption {
            value: value.to_owned(),
            label: if value == ALL_CATEGORIES {
                "All".to_string()
            } else {
                value.to_owned()
            },
            selected: value == selected,
        })
        .collect();

    let return_to = uri
        .path_and_query()
        .map_or_else(|| "/products".to_string(), ToString::to_string);

    Ok(ProductsIndexTemplate {
        chrome: PageChrome::new(&state, shop.shop(), &flash, "/products"),
        products,
        categories,
        search: query.q.clone().unwrap_or_default(),
        wishlist_only: filter.wishlist_only,
        return_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_to_filter() {
        let query = ProductQuery {
            category: Some("lighting".to_string()),
            q: Some("lamp".to_string()),
            wishlist: Some("1".to_string()),
        };
        let filter = query.to_filter();
        assert_eq!(filter.category.as_deref(), Some("lighting"));
        assert_eq!(filter.search.as_deref(), Some("lamp"));
        assert!(filter.wishlist_only);

        assert!(!ProductQuery::default().to_filter().wishlist_only);
    }
}
