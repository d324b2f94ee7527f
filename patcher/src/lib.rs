//! Post-build brand patcher for the admin portal's static assets.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure text logic (rule application, guarded injection,
//!   data URIs, report types). No I/O.
//! - **[`io`]**: Filesystem side (config, file lookup, image encoding, writes).
//!
//! [`steps`] combine the two into the individual patches, and [`patch`] runs
//! them in a fixed order for `patcher apply`.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod patch;
pub mod report;
pub mod steps;
pub mod templates;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
