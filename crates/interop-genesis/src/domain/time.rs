//! # Genesis Time Resolution
//!
//! Turns an absolute timestamp or a delay into one validated start time.
//! `now` is always passed in; nothing here reads the wall clock.

use chrono::TimeDelta;
use tracing::info;

use crate::config::TimeSpec;
use crate::error::{BootstrapError, Result};

/// A start time that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGenesisTime {
    /// Genesis time (UNIX seconds)
    pub genesis_time: u64,
    /// Seconds between `now` and genesis
    pub seconds_until: u64,
}

/// Resolve the genesis start time.
///
/// - `Absolute(t)`: `t` must be strictly greater than `now`
/// - `Delay(d)`: `d` must be non-negative; result is `now + d`
/// - `None`: configuration error
pub fn resolve_genesis_time(now: u64, spec: Option<TimeSpec>) -> Result<ResolvedGenesisTime> {
    let resolved = match spec {
        Some(TimeSpec::Absolute(timestamp)) => {
            if timestamp <= now {
                return Err(BootstrapError::invalid_time(format!(
                    "start time {timestamp} must be in the future (current time is {now})"
                )));
            }
            ResolvedGenesisTime {
                genesis_time: timestamp,
                seconds_until: timestamp - now,
            }
        }
        Some(TimeSpec::Delay(delay)) => {
            let delay = u64::try_from(delay).map_err(|_| {
                BootstrapError::invalid_time(format!("start delay {delay} must not be negative"))
            })?;
            let genesis_time = now.checked_add(delay).ok_or_else(|| {
                BootstrapError::invalid_time(format!("start delay {delay} overflows the clock"))
            })?;
            ResolvedGenesisTime {
                genesis_time,
                seconds_until: delay,
            }
        }
        None => {
            return Err(BootstrapError::Configuration(
                "no start time or start delay configured".to_string(),
            ))
        }
    };

    info!(
        genesis_time = resolved.genesis_time,
        "Time will begin {} from now",
        humanize_seconds(resolved.seconds_until)
    );

    Ok(resolved)
}

/// Render a span of seconds as e.g. `1d2h3m4s`.
pub fn humanize_seconds(seconds: u64) -> String {
    let Some(span) = i64::try_from(seconds).ok().and_then(TimeDelta::try_seconds) else {
        return format!("{seconds}s");
    };

    let units = [
        (span.num_days(), "d"),
        (span.num_hours() % 24, "h"),
        (span.num_minutes() % 60, "m"),
        (span.num_seconds() % 60, "s"),
    ];

    let rendered: String = units
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| format!("{amount}{unit}"))
        .collect();

    if rendered.is_empty() {
        "0s".to_string()
    } else {
        rendered
    }
}
