//! Time-based identifiers and the date formats stored in sheet cells.

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;

/// Calendar date as stored in `created_at`-style cells (`YYYY-MM-DD`, UTC).
pub(crate) fn date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Full timestamp with millisecond precision (`2024-05-01T09:30:00.000Z`).
pub(crate) fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Identifier of the form `{prefix}_{unix millis}`.
pub(crate) fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", prefix, now.timestamp_millis())
}
