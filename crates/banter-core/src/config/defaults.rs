// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_READ_ONLY: bool = false;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Matching ---
pub const DEFAULT_RESPONSE_TIME_MS: u64 = 0;
/// Hard ceiling on the configured response pacing delay (ten minutes).
pub const MAX_RESPONSE_TIME_MS: u64 = 600_000;
