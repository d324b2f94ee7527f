//! Stable exit codes for patcher CLI commands.

/// Command succeeded. Step failures still exit with `OK` unless `--strict` is set.
pub const OK: i32 = 0;
/// Unhandled error: invalid root or config, template setup, I/O outside a step.
pub const FAILED: i32 = 1;
/// `patcher apply --strict` saw at least one failed step.
pub const STEP_FAILED: i32 = 2;
