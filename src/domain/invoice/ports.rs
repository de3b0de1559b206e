use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceFields, NewInvoice};
use super::errors::InvoiceError;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError>;
  /// Overwrites customer, amount and status of one row. Returns how many rows matched.
  async fn update(&self, id: Uuid, fields: InvoiceFields) -> Result<u64, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError>;
}

/// Cache of rendered dashboard views, keyed by request path.
///
/// Every path carries a generation that `invalidate` bumps. A view rendered
/// from data read under generation `g` is only stored and served while the
/// path is still at `g`, so a render racing an invalidation never outlives it.
#[async_trait]
pub trait ViewCache: Send + Sync {
  async fn get(&self, path: &str) -> Result<Option<String>, InvoiceError>;
  /// Current generation of `path`. Read it before loading the data to render.
  async fn generation(&self, path: &str) -> Result<u64, InvoiceError>;
  /// Stores `html` unless `path` was invalidated since `generation`.
  /// Returns whether the view was stored.
  async fn put(&self, path: &str, html: String, generation: u64) -> Result<bool, InvoiceError>;
  async fn invalidate(&self, path: &str) -> Result<(), InvoiceError>;
}
