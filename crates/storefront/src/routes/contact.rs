//! Contact form route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use lantern_core::{ContactForm, Notifier, contact::SENT_MESSAGE};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::ShopSession;
use crate::models::Flash;
use crate::routes::page::PageChrome;
use crate::state::AppState;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub chrome: PageChrome,
    /// Values to refill the form with after a refused submission.
    pub form: ContactForm,
    pub error: Option<String>,
}

/// Display the contact form.
#[instrument(skip(state, shop))]
pub async fn show(State(state): State<AppState>, shop: ShopSession) -> Result<ContactTemplate> {
    let flash = shop.take_flash().await?;
    Ok(ContactTemplate {
        chrome: PageChrome::new(&state, shop.shop(), &flash, "/contact"),
        form: ContactForm::default(),
        error: None,
    })
}

/// Submit a contact message.
///
/// A refused form is re-rendered with its values and the reason (422).
/// An accepted one waits out the configured latency, is logged, and
/// redirects to a fresh form with the confirmation toast.
#[instrument(skip(state, shop, form))]
pub async fn submit(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(error) => {
            tracing::debug!(%error, "Contact form refused");
            let page = ContactTemplate {
                chrome: PageChrome::new(&state, shop.shop(), &Flash::default(), "/contact"),
                form,
                error: Some(error.to_string()),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    tokio::time::sleep(state.ui().contact_latency).await;
    tracing::info!(
        email = %submission.email,
        subject = %submission.subject,
        "Contact message received"
    );

    shop.apply(|_, view| view.notify(SENT_MESSAGE));
    shop.commit().await?;
    Ok(Redirect::to("/contact").into_response())
}
