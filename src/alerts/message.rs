//! Operator-facing alert message formatting.

use chrono::{DateTime, Local};

/// Message for an unplanned pool switch.
pub fn failover(from: &str, to: &str, release: &str, at: DateTime<Local>) -> String {
    format!(
        "🚨 *Failover Detected!* 🚨\n\
         Pool switched: `{from}` → `{to}`\n\
         Release: `{release}`\n\
         Time: {}\n\
         Action: Check health of `{from}` container",
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Message for a sustained elevated 5xx rate over the rolling window.
pub fn error_rate(
    rate: f64,
    threshold: f64,
    window_size: usize,
    pool: &str,
    at: DateTime<Local>,
) -> String {
    format!(
        "🚨 *High Error Rate Alert!* 🚨\n\
         Error rate: `{rate:.2}%` (threshold: {threshold}%)\n\
         Window size: {window_size} requests\n\
         Current pool: `{pool}`\n\
         Time: {}\n\
         Action: Inspect logs and consider switching pools",
        at.format("%Y-%m-%d %H:%M:%S")
    )
}
