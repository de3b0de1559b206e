use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceFields, NewInvoice};
use super::errors::InvoiceError;
use super::ports::InvoiceRepository;

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>) -> Self {
    Self { invoice_repo }
  }

  pub async fn create_invoice(&self, fields: InvoiceFields) -> Result<Invoice, InvoiceError> {
    let new_invoice = NewInvoice::today(fields);
    let invoice = self.invoice_repo.create(new_invoice).await?;

    tracing::info!(
      invoice_id = %invoice.id,
      customer_id = %invoice.customer_id,
      amount_cents = invoice.amount.cents(),
      "Invoice created"
    );

    Ok(invoice)
  }

  pub async fn update_invoice(
    &self,
    invoice_id: Uuid,
    fields: InvoiceFields,
  ) -> Result<(), InvoiceError> {
    let affected = self.invoice_repo.update(invoice_id, fields).await?;

    if affected == 0 {
      tracing::warn!(invoice_id = %invoice_id, "Update matched no invoice");
    } else {
      tracing::info!(invoice_id = %invoice_id, "Invoice updated");
    }

    Ok(())
  }

  pub async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), InvoiceError> {
    self.invoice_repo.delete(invoice_id).await?;
    tracing::info!(invoice_id = %invoice_id, "Invoice deleted");
    Ok(())
  }

  pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_repo.find_all().await
  }
}
