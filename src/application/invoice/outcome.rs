use serde::Serialize;

use crate::domain::invoice::ViewCache;

/// Dashboard view that every invoice action invalidates.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Message returned to the form when the store rejects a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionMessage {
  pub message: String,
}

impl ActionMessage {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Result of a form action that got past validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormActionOutcome {
  /// The write succeeded and the client should navigate to the path.
  Redirect(String),
  /// The write succeeded; the current page stays.
  Refreshed,
  /// The write failed.
  Failed(ActionMessage),
}

impl FormActionOutcome {
  pub fn failed(message: impl Into<String>) -> Self {
    FormActionOutcome::Failed(ActionMessage::new(message))
  }
}

/// Drops the cached view at `path`. Cache trouble is logged, not surfaced.
pub(crate) async fn revalidate_path(view_cache: &dyn ViewCache, path: &str) {
  match view_cache.invalidate(path).await {
    Ok(()) => tracing::debug!(path, "Invalidated cached view"),
    Err(e) => tracing::warn!(path, error = %e, "Failed to invalidate cached view"),
  }
}
