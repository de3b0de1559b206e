pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Invoice, InvoiceFields, NewInvoice};
pub use errors::InvoiceError;
pub use ports::{InvoiceRepository, ViewCache};
pub use services::InvoiceService;
pub use value_objects::{AmountInCents, InvoiceStatus, ValueObjectError};
