//! Pipeline Demo Server — Library Root
//!
//! Re-exports all modules for integration tests.

pub mod adapters;
pub mod config;
