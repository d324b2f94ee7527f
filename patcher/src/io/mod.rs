//! Filesystem side of the patcher: config, lookup, encoding, writes.

pub mod config;
pub mod encoder;
pub mod locator;
pub mod paths;
pub mod writer;
