use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceCommand {
  pub invoice_id: Uuid,
}

/// Invoice as shown in the edit form, amount back in currency units.
#[derive(Debug, Serialize)]
pub struct InvoiceFormResponse {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub amount: String,
  pub status: String,
  pub date: NaiveDate,
}

pub struct GetInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceCommand,
  ) -> Result<InvoiceFormResponse, InvoiceError> {
    let invoice = self
      .invoice_service
      .get_invoice(command.invoice_id)
      .await?;

    Ok(InvoiceFormResponse {
      id: invoice.id,
      customer_id: invoice.customer_id,
      amount: invoice.amount.to_string(),
      status: invoice.status.as_str().to_string(),
      date: invoice.date,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{FakeInvoiceRepository, sample_invoice};

  #[tokio::test]
  async fn test_get_existing_invoice() {
    let invoice = sample_invoice();
    let repo = Arc::new(FakeInvoiceRepository::with_rows(vec![invoice.clone()]));
    let use_case = GetInvoiceUseCase::new(Arc::new(InvoiceService::new(repo)));

    let response = use_case
      .execute(GetInvoiceCommand {
        invoice_id: invoice.id,
      })
      .await
      .unwrap();

    assert_eq!(response.customer_id, invoice.customer_id);
    assert_eq!(response.amount, "99.99");
  }

  #[tokio::test]
  async fn test_get_missing_invoice() {
    let repo = Arc::new(FakeInvoiceRepository::default());
    let use_case = GetInvoiceUseCase::new(Arc::new(InvoiceService::new(repo)));
    let missing = Uuid::new_v4();

    let result = use_case
      .execute(GetInvoiceCommand {
        invoice_id: missing,
      })
      .await;

    assert!(matches!(result, Err(InvoiceError::InvoiceNotFound(id)) if id == missing));
  }
}
