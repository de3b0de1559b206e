//! Application layer
//!
//! Use cases that turn submitted forms into domain operations and decide
//! what the client sees next.

pub mod invoice;
