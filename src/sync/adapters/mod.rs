//! Adapter implementations for reconciliation ports.

pub mod file;
pub mod http;
pub mod memory;
