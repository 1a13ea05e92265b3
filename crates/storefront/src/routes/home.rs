//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::ShopSession;
use crate::routes::page::{PageChrome, ProductCardView, ProductGrid};
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub featured: Vec<ProductCardView>,
    pub categories: Vec<String>,
    pub return_to: String,
}

/// Display the home page.
#[instrument(skip(state, shop))]
pub async fn home(State(state): State<AppState>, shop: ShopSession) -> Result<HomeTemplate> {
    let flash = shop.take_flash().await?;
    let catalog = state.catalog();

    let featured = ProductGrid::build(
        catalog.products().iter().take(FEATURED_COUNT),
        shop.shop(),
        flash.added,
    );

    Ok(HomeTemplate {
        chrome: PageChrome::new(&state, shop.shop(), &flash, "/"),
        featured,
        categories: catalog.categories().into_iter().map(str::to_owned).collect(),
        return_to: "/".to_string(),
    })
}
