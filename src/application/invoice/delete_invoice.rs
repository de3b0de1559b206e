use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::outcome::{FormActionOutcome, INVOICES_PATH, revalidate_path};
use crate::domain::invoice::{InvoiceService, ViewCache};

#[derive(Debug, Deserialize)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: Uuid,
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  view_cache: Arc<dyn ViewCache>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, view_cache: Arc<dyn ViewCache>) -> Self {
    Self {
      invoice_service,
      view_cache,
    }
  }

  /// Deletes the invoice. The dashboard view is invalidated even when the
  /// delete fails, since the row may or may not be gone.
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> FormActionOutcome {
    let outcome = match self.invoice_service.delete_invoice(command.invoice_id).await {
      Ok(()) => FormActionOutcome::Refreshed,
      Err(e) => {
        tracing::error!(invoice_id = %command.invoice_id, error = %e, "Failed to delete invoice");
        FormActionOutcome::failed("Database Error: Failed to Delete Invoice.")
      }
    };

    revalidate_path(self.view_cache.as_ref(), INVOICES_PATH).await;
    outcome
  }
}
