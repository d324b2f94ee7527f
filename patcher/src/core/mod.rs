//! Deterministic text logic for the patcher.
//!
//! Core modules perform no I/O. They transform in-memory buffers and return
//! values that the steps decide how to persist.

pub mod data_uri;
pub mod inject;
pub mod rules;
pub mod types;
