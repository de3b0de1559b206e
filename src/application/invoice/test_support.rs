//! In-memory doubles for use case tests.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::invoice::{
  Invoice, InvoiceError, InvoiceFields, InvoiceRepository, NewInvoice, ViewCache,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
  Insert(NewInvoice),
  Update(Uuid, InvoiceFields),
  Delete(Uuid),
}

#[derive(Default)]
pub struct FakeInvoiceRepository {
  pub rows: Mutex<Vec<Invoice>>,
  pub calls: Mutex<Vec<StoreCall>>,
  pub fail_writes: bool,
}

impl FakeInvoiceRepository {
  pub fn failing() -> Self {
    Self {
      fail_writes: true,
      ..Self::default()
    }
  }

  pub fn with_rows(rows: Vec<Invoice>) -> Self {
    Self {
      rows: Mutex::new(rows),
      ..Self::default()
    }
  }

  pub fn calls(&self) -> Vec<StoreCall> {
    self.calls.lock().unwrap().clone()
  }

  pub fn rows(&self) -> Vec<Invoice> {
    self.rows.lock().unwrap().clone()
  }

  fn record(&self, call: StoreCall) -> Result<(), InvoiceError> {
    self.calls.lock().unwrap().push(call);
    if self.fail_writes {
      return Err(InvoiceError::Database(sqlx::Error::PoolTimedOut));
    }
    Ok(())
  }
}

#[async_trait]
impl InvoiceRepository for FakeInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    self.record(StoreCall::Insert(invoice.clone()))?;
    let created = Invoice::from_new(Uuid::new_v4(), invoice);
    self.rows.lock().unwrap().push(created.clone());
    Ok(created)
  }

  async fn update(&self, id: Uuid, fields: InvoiceFields) -> Result<u64, InvoiceError> {
    self.record(StoreCall::Update(id, fields.clone()))?;
    let mut rows = self.rows.lock().unwrap();
    let mut affected = 0;
    for row in rows.iter_mut().filter(|row| row.id == id) {
      row.apply(fields.clone());
      affected += 1;
    }
    Ok(affected)
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    self.record(StoreCall::Delete(id))?;
    self.rows.lock().unwrap().retain(|row| row.id != id);
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    Ok(self.rows().into_iter().find(|row| row.id == id))
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    Ok(self.rows())
  }
}

#[derive(Default)]
pub struct RecordingViewCache {
  pub invalidated: Mutex<Vec<String>>,
  pub fail: bool,
}

impl RecordingViewCache {
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  pub fn invalidated(&self) -> Vec<String> {
    self.invalidated.lock().unwrap().clone()
  }
}

#[async_trait]
impl ViewCache for RecordingViewCache {
  async fn get(&self, _path: &str) -> Result<Option<String>, InvoiceError> {
    Ok(None)
  }

  async fn generation(&self, _path: &str) -> Result<u64, InvoiceError> {
    Ok(self.invalidated.lock().unwrap().len() as u64)
  }

  async fn put(&self, _path: &str, _html: String, _generation: u64) -> Result<bool, InvoiceError> {
    Ok(false)
  }

  async fn invalidate(&self, path: &str) -> Result<(), InvoiceError> {
    self.invalidated.lock().unwrap().push(path.to_string());
    if self.fail {
      return Err(InvoiceError::Cache("cache unavailable".to_string()));
    }
    Ok(())
  }
}

pub fn sample_invoice() -> Invoice {
  let fields = InvoiceFields::parse(&Uuid::new_v4().to_string(), "99.99", "pending").unwrap();
  let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
  Invoice::from_new(Uuid::new_v4(), NewInvoice::new(fields, date))
}
