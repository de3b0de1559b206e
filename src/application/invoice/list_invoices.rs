use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct InvoiceListItemDto {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub amount: String,
  pub amount_cents: i64,
  pub status: String,
  pub date: NaiveDate,
}

impl From<Invoice> for InvoiceListItemDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      customer_id: invoice.customer_id,
      amount: invoice.amount.to_string(),
      amount_cents: invoice.amount.cents(),
      status: invoice.status.as_str().to_string(),
      date: invoice.date,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, InvoiceError> {
    let mut invoices = self.invoice_service.list_invoices().await?;
    invoices.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(ListInvoicesResponse {
      invoices: invoices.into_iter().map(InvoiceListItemDto::from).collect(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{FakeInvoiceRepository, sample_invoice};

  #[tokio::test]
  async fn test_lists_newest_first_with_decimal_amounts() {
    let mut older = sample_invoice();
    older.date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let newer = sample_invoice();

    let repo = Arc::new(FakeInvoiceRepository::with_rows(vec![
      older.clone(),
      newer.clone(),
    ]));
    let use_case = ListInvoicesUseCase::new(Arc::new(InvoiceService::new(repo)));

    let response = use_case.execute().await.unwrap();

    assert_eq!(response.invoices.len(), 2);
    assert_eq!(response.invoices[0].id, newer.id);
    assert_eq!(response.invoices[1].id, older.id);
    assert_eq!(response.invoices[0].amount, "99.99");
    assert_eq!(response.invoices[0].amount_cents, 9999);
    assert_eq!(response.invoices[0].status, "pending");
  }
}
