//! Per-request cart and wishlist state.
//!
//! [`ShopSession`] restores a [`Shop`] from the visitor's session at the
//! start of a request and, once the handler has run its operation, writes
//! the changed storage keys and any feedback back.

use axum::{extract::FromRequestParts, http::request::Parts};
use lantern_core::Shop;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session::SHOP_KEYS;
use crate::models::{Flash, FlashView, SessionStorage};
use crate::state::AppState;

/// The visitor's shop for the duration of one request.
pub struct ShopSession {
    session: Session,
    shop: Shop<SessionStorage>,
    view: FlashView,
}

impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::Internal(message.to_string()))?;
        let storage = SessionStorage::load(&session, SHOP_KEYS).await?;

        Ok(Self {
            session,
            shop: Shop::load(storage, state.pricing()),
            view: FlashView::new(),
        })
    }
}

impl ShopSession {
    /// Read-only access to the restored shop.
    #[must_use]
    pub const fn shop(&self) -> &Shop<SessionStorage> {
        &self.shop
    }

    /// Run one shop operation against this request's view.
    pub fn apply<T>(
        &mut self,
        operation: impl FnOnce(&mut Shop<SessionStorage>, &mut FlashView) -> T,
    ) -> T {
        operation(&mut self.shop, &mut self.view)
    }

    /// Pending feedback from the previous request, removed from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn take_flash(&self) -> Result<Flash, AppError> {
        Ok(Flash::take(&self.session).await?)
    }

    /// Persist changed storage keys and this request's feedback.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn commit(self) -> Result<(), AppError> {
        let Self {
            session,
            shop,
            view,
        } = self;

        let mut storage = shop.into_storage();
        if storage.is_dirty() {
            storage.commit(&session).await?;
        }
        view.commit(&session).await?;
        Ok(())
    }
}
