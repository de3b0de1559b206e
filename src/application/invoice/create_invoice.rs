use serde::Deserialize;
use std::sync::Arc;

use super::outcome::{FormActionOutcome, INVOICES_PATH, revalidate_path};
use crate::domain::invoice::{InvoiceError, InvoiceFields, InvoiceService, ViewCache};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub customer_id: String,
  pub amount: String,
  pub status: String,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  view_cache: Arc<dyn ViewCache>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, view_cache: Arc<dyn ViewCache>) -> Self {
    Self {
      invoice_service,
      view_cache,
    }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<FormActionOutcome, InvoiceError> {
    let fields = InvoiceFields::parse(&command.customer_id, &command.amount, &command.status)?;

    if let Err(e) = self.invoice_service.create_invoice(fields).await {
      tracing::error!(error = %e, "Failed to create invoice");
      return Ok(FormActionOutcome::failed(
        "Database Error: Failed to Create Invoice.",
      ));
    }

    revalidate_path(self.view_cache.as_ref(), INVOICES_PATH).await;
    Ok(FormActionOutcome::Redirect(INVOICES_PATH.to_string()))
  }
}
