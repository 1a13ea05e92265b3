//! One-shot feedback carried across the POST/redirect/GET cycle.
//!
//! A shop operation runs inside a POST handler, but its feedback is shown
//! on the page the browser is redirected to. [`FlashView`] records what the
//! shop asked the view to show; the handler commits it to the session and
//! the next page render takes it back out with [`Flash::take`].

use lantern_core::{Notifier, ProductId, ShopView};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session::keys;

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

impl ToastKind {
    /// CSS modifier class for the toast element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

/// A transient message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Collects feedback from shop operations during one request.
///
/// Holds a single toast slot: a later message replaces an earlier one, so
/// only the most recent is shown.
#[derive(Debug, Clone, Default)]
pub struct FlashView {
    toast: Option<Toast>,
    added: Option<ProductId>,
}

impl FlashView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    #[must_use]
    pub const fn added(&self) -> Option<ProductId> {
        self.added
    }

    /// Store the collected feedback for the next page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn commit(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        if let Some(toast) = self.toast {
            session.insert(keys::TOAST, toast).await?;
        }
        if let Some(id) = self.added {
            session.insert(keys::ADDED_PRODUCT, id).await?;
        }
        Ok(())
    }

    fn show(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.to_owned(),
            kind,
        });
    }
}

impl Notifier for FlashView {
    fn notify(&mut self, message: &str) {
        self.show(message, ToastKind::Success);
    }

    fn reject(&mut self, message: &str) {
        self.show(message, ToastKind::Error);
    }
}

impl ShopView for FlashView {
    fn mark_added(&mut self, id: ProductId) {
        self.added = Some(id);
    }
}

/// Feedback waiting to be shown on the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    pub toast: Option<Toast>,
    pub added: Option<ProductId>,
}

impl Flash {
    /// Remove and return the pending feedback from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn take(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(Self {
            toast: session.remove::<Toast>(keys::TOAST).await?,
            added: session.remove::<ProductId>(keys::ADDED_PRODUCT).await?,
        })
    }
}
