//! Checkout route handlers.
//!
//! The browser's confirm dialog becomes a two-step flow: `GET /checkout`
//! asks the question on a page and `POST /checkout` carries the answer.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use lantern_core::CheckoutOutcome;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::ShopSession;
use crate::routes::cart::SummaryView;
use crate::routes::page::PageChrome;
use crate::state::AppState;

/// The shopper's answer to the checkout question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Cancel,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub decision: Decision,
}

/// Checkout confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirm.html")]
pub struct CheckoutConfirmTemplate {
    pub chrome: PageChrome,
    pub prompt: String,
    pub summary: SummaryView,
}

/// Ask the shopper to confirm the order total.
///
/// An empty cart is refused right away and the shopper is sent back to
/// the cart page with the rejection toast.
#[instrument(skip(state, shop))]
pub async fn confirm(State(state): State<AppState>, mut shop: ShopSession) -> Result<Response> {
    let flash = shop.take_flash().await?;

    let Some(prompt) = shop.shop().checkout_prompt() else {
        let refused = shop.apply(|shop, view| shop.checkout(view, &mut |_: &str| false));
        tracing::debug!(?refused, "Checkout refused");
        shop.commit().await?;
        return Ok(Redirect::to("/cart").into_response());
    };

    Ok(CheckoutConfirmTemplate {
        chrome: PageChrome::new(&state, shop.shop(), &flash, "/cart"),
        prompt,
        summary: SummaryView::from(&shop.shop().summary()),
    }
    .into_response())
}

/// Place or cancel the order.
#[instrument(skip(shop))]
pub async fn place(mut shop: ShopSession, Form(form): Form<CheckoutForm>) -> Result<Redirect> {
    let accepted = form.decision == Decision::Accept;
    let result = shop.apply(|shop, view| shop.checkout(view, &mut |_: &str| accepted));

    match &result {
        Ok(CheckoutOutcome::Placed { summary }) => {
            add_breadcrumb(
                "checkout",
                "Order placed",
                Some(&[("total", summary.total_display().as_str())]),
            );
        }
        Ok(CheckoutOutcome::Cancelled) => tracing::debug!("Checkout cancelled"),
        Err(error) => tracing::debug!(%error, "Checkout refused"),
    }

    shop.commit().await?;
    Ok(Redirect::to("/cart"))
}
