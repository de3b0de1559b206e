use serde::{Deserialize, Serialize};
use validator::Validate;

/// Submitted invoice form, shared by the create and edit pages.
///
/// Values stay as the raw strings the browser sent; the application layer
/// coerces and validates their content.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
  /// Id of the billed customer
  #[validate(required(message = "Customer is required"))]
  pub customer_id: Option<String>,

  /// Amount in currency units, e.g. "12.50". Left out, it counts as zero.
  pub amount: Option<String>,

  /// "pending" or "paid"
  #[validate(required(message = "Status is required"))]
  pub status: Option<String>,
}

impl InvoiceForm {
  /// Splits a validated form into its three values.
  pub fn into_values(self) -> (String, String, String) {
    (
      self.customer_id.unwrap_or_default(),
      self.amount.unwrap_or_default(),
      self.status.unwrap_or_default(),
    )
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
