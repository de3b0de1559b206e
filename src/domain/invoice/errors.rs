use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Cache error: {0}")]
  Cache(String),
}

impl InvoiceError {
  pub fn is_validation(&self) -> bool {
    matches!(self, InvoiceError::Validation(_))
  }
}
