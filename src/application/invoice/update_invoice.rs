use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::outcome::{FormActionOutcome, INVOICES_PATH, revalidate_path};
use crate::domain::invoice::{InvoiceError, InvoiceFields, InvoiceService, ViewCache};

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: Uuid,
  pub customer_id: String,
  pub amount: String,
  pub status: String,
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  view_cache: Arc<dyn ViewCache>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, view_cache: Arc<dyn ViewCache>) -> Self {
    Self {
      invoice_service,
      view_cache,
    }
  }

  pub async fn execute(
    &self,
    command: UpdateInvoiceCommand,
  ) -> Result<FormActionOutcome, InvoiceError> {
    let fields = InvoiceFields::parse(&command.customer_id, &command.amount, &command.status)?;

    if let Err(e) = self
      .invoice_service
      .update_invoice(command.invoice_id, fields)
      .await
    {
      tracing::error!(invoice_id = %command.invoice_id, error = %e, "Failed to update invoice");
      return Ok(FormActionOutcome::failed(
        "Database Error: Failed to Update Invoice.",
      ));
    }

    revalidate_path(self.view_cache.as_ref(), INVOICES_PATH).await;
    Ok(FormActionOutcome::Redirect(INVOICES_PATH.to_string()))
  }
}
