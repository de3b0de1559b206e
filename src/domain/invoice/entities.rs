use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::value_objects::{AmountInCents, InvoiceStatus, ValueObjectError, parse_customer_id};

// Invoice Fields - everything a form action writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFields {
  pub customer_id: Uuid,
  pub amount: AmountInCents,
  pub status: InvoiceStatus,
}

impl InvoiceFields {
  /// Validates the raw form values of an invoice form.
  pub fn parse(customer_id: &str, amount: &str, status: &str) -> Result<Self, ValueObjectError> {
    Ok(Self {
      customer_id: parse_customer_id(customer_id)?,
      amount: AmountInCents::parse(amount)?,
      status: InvoiceStatus::from_str(status)?,
    })
  }
}

// New Invoice - not yet persisted, the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
  pub fields: InvoiceFields,
  pub date: NaiveDate,
}

impl NewInvoice {
  pub fn new(fields: InvoiceFields, date: NaiveDate) -> Self {
    Self { fields, date }
  }

  /// Dated with the current UTC calendar day.
  pub fn today(fields: InvoiceFields) -> Self {
    Self::new(fields, Utc::now().date_naive())
  }
}

// Invoice - a persisted row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub amount: AmountInCents,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl Invoice {
  pub fn from_new(id: Uuid, new_invoice: NewInvoice) -> Self {
    Self {
      id,
      customer_id: new_invoice.fields.customer_id,
      amount: new_invoice.fields.amount,
      status: new_invoice.fields.status,
      date: new_invoice.date,
    }
  }

  /// Overwrites every mutable field; the date is kept.
  pub fn apply(&mut self, fields: InvoiceFields) {
    self.customer_id = fields.customer_id;
    self.amount = fields.amount;
    self.status = fields.status;
  }

  pub fn fields(&self) -> InvoiceFields {
    InvoiceFields {
      customer_id: self.customer_id,
      amount: self.amount,
      status: self.status,
    }
  }
}
