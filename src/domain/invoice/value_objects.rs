use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid customer id: {0}")]
  InvalidCustomerId(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Paid,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Paid => "paid",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  // Form values are matched exactly; "Paid" is not "paid".
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(InvoiceStatus::Pending),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Expected 'pending' or 'paid', got '{}'",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Amount in cents - what gets persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AmountInCents(i64);

impl AmountInCents {
  /// Converts a decimal currency amount into cents.
  pub fn from_decimal(amount: Decimal) -> Result<Self, ValueObjectError> {
    let cents = amount * Decimal::ONE_HUNDRED;
    if !cents.fract().is_zero() {
      return Err(ValueObjectError::InvalidAmount(format!(
        "{} has more than two decimal places",
        amount
      )));
    }

    i64::try_from(cents)
      .map(Self)
      .map_err(|_| ValueObjectError::InvalidAmount(format!("{} is out of range", amount)))
  }

  /// Coerces a submitted form value into cents.
  ///
  /// Blank input coerces to zero, anything else must be a plain or
  /// exponent-form decimal number. Digit separators are not numbers.
  pub fn parse(raw: &str) -> Result<Self, ValueObjectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Ok(Self(0));
    }

    let not_a_number = || ValueObjectError::InvalidAmount(format!("'{}' is not a number", raw));
    if trimmed.contains('_') {
      return Err(not_a_number());
    }

    let amount = if trimmed.contains(['e', 'E']) {
      Decimal::from_scientific(trimmed)
    } else {
      Decimal::from_str(trimmed)
    }
    .map_err(|_| not_a_number())?;

    Self::from_decimal(amount)
  }

  pub fn from_cents(cents: i64) -> Self {
    Self(cents)
  }

  pub fn cents(&self) -> i64 {
    self.0
  }

  pub fn to_decimal(&self) -> Decimal {
    Decimal::new(self.0, 2)
  }
}

impl fmt::Display for AmountInCents {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_decimal())
  }
}

/// Parses the customer reference submitted with an invoice form.
pub fn parse_customer_id(raw: &str) -> Result<Uuid, ValueObjectError> {
  Uuid::parse_str(raw.trim())
    .map_err(|_| ValueObjectError::InvalidCustomerId(format!("'{}' is not a valid id", raw)))
}
