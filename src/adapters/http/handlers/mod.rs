pub mod invoices_web;
