//! Stable exit codes for themer CLI commands.

/// Command succeeded; for `resolve`, a template was found.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config/context input or other errors.
pub const INVALID: i32 = 1;
/// `resolve` walked the full candidate list without a hit.
pub const NOT_FOUND: i32 = 2;
