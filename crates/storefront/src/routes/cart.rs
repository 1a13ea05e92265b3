//! Cart route handlers.
//!
//! Every mutation is a form POST that runs one shop operation against the
//! visitor's session, then redirects (303) back to a page that shows the
//! result and the toast.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use lantern_core::{OrderSummary, ProductId, format_amount};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::ShopSession;
use crate::routes::page::{PageChrome, safe_return_to};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Order summary display data for templates.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal_display(),
            shipping: summary.shipping_display(),
            tax: summary.tax_display(),
            total: summary.total_display(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: ProductId,
    pub return_to: Option<String>,
}

/// Change quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: ProductId,
    pub delta: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
}

/// Display cart page.
#[instrument(skip(state, shop))]
pub async fn show(State(state): State<AppState>, shop: ShopSession) -> Result<CartShowTemplate> {
    let flash = shop.take_flash().await?;
    let items = shop
        .shop()
        .cart()
        .items()
        .iter()
        .map(|item| CartItemView {
            id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity,
            line_total: format_amount(item.line_total()),
        })
        .collect();

    Ok(CartShowTemplate {
        chrome: PageChrome::new(&state, shop.shop(), &flash, "/cart"),
        items,
        summary: SummaryView::from(&shop.shop().summary()),
    })
}

/// Add one unit of a catalog product to the cart.
///
/// Name, price and image come from the catalog, never from the form.
#[instrument(skip(state, shop))]
pub async fn add(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .get(form.id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.id)))?;

    let quantity = shop.apply(|shop, view| {
        shop.add_item(
            product.id,
            &product.name,
            product.price,
            product.image.as_deref(),
            view,
        )
    });
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("product_id", product.id.to_string().as_str()),
            ("quantity", quantity.to_string().as_str()),
        ]),
    );
    shop.commit().await?;

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/products",
    )))
}

/// Change the quantity of a cart line by `delta`.
#[instrument(skip(shop))]
pub async fn update(mut shop: ShopSession, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let change = shop.apply(|shop, view| shop.change_quantity(form.id, form.delta, view));
    tracing::debug!(?change, "Cart line updated");
    shop.commit().await?;
    Ok(Redirect::to("/cart"))
}

/// Remove a cart line.
#[instrument(skip(shop))]
pub async fn remove(
    mut shop: ShopSession,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    if shop.apply(|shop, view| shop.remove_item(form.id, view)) {
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", form.id.to_string().as_str())]),
        );
    }
    shop.commit().await?;
    Ok(Redirect::to("/cart"))
}

/// Cart count badge as plain text.
#[instrument(skip(shop))]
pub async fn count(shop: ShopSession) -> String {
    shop.shop().total_item_count().to_string()
}
