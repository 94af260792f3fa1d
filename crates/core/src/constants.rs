/// Decimal precision for balance calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Sentinel used in cache keys when no account filter is applied
pub const ALL_ACCOUNTS_KEY: &str = "all";
