//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part
//! of the shell contract — scripts rely on them.
//!
//! | Range | Domain        | Description                              |
//! |-------|---------------|------------------------------------------|
//! | 0     | Universal     | Success                                  |
//! | 1     | Universal     | General error (unspecified)              |
//! | 2     | Universal     | Usage error (bad args, bad selection)    |
//! | 10-19 | Configuration | Startup configuration problems           |
//! | 50-59 | Webhook       | Endpoint / upstream failures             |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown document/sheet/row, missing
/// selection.
pub const EXIT_USAGE: u8 = 2;

/// Neither webhook domain is configured.
pub const EXIT_CONFIG_INVALID: u8 = 10;

/// Every candidate endpoint failed for the requested operation.
pub const EXIT_ENDPOINTS_EXHAUSTED: u8 = 50;
