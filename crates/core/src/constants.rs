//! Shared constants for daily-report.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Earliest year accepted for a month period.
pub const MIN_PERIOD_YEAR: i32 = 1970;

/// Latest year accepted for a month period.
pub const MAX_PERIOD_YEAR: i32 = 9999;

/// Header line of every plain-text report rendering.
pub const REPORT_TEXT_HEADER: &str = "dailyreport";

/// Separator between reports in the monthly text export.
pub const EXPORT_SEPARATOR: &str = "\n\n====================\n\n";
