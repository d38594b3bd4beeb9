//! # Temporal Types — UTC-Only Timestamps and the Abstract Clock
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds precision,
//! and `Clock`, the collaborator that supplies the current reading. The
//! crossing consumes the clock in exactly one place — permission-expiry
//! evaluation — so the seam is a single-method trait.
//!
//! ## Invariant
//!
//! Clock readings are monotonically non-decreasing. `SystemClock` inherits
//! this from the host's UTC time; `ManualClock` only ever advances.
//!
//! Timestamps reject non-UTC inputs **at construction** — there is no silent
//! conversion that could introduce ambiguity between equal instants with
//! different offsets.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing or parsing a [`Timestamp`].
#[derive(Error, Debug)]
pub enum TimeError {
    /// The input carried a timezone offset other than `Z`.
    #[error("timestamp must use Z suffix (UTC only), got: {0:?}")]
    NonUtc(String),

    /// The input was not valid RFC 3339.
    #[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// The parser's rejection reason.
        reason: String,
    },

    /// The Unix timestamp was outside the representable range.
    #[error("invalid Unix timestamp: {0}")]
    InvalidEpoch(i64),
}

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::from_epoch_secs()`] — from a Unix epoch reading.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, TimeError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or(TimeError::InvalidEpoch(secs))?;
        Ok(Self(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only the `Z` suffix is accepted — even
    /// `+00:00`, which is semantically equivalent, is rejected so that every
    /// instant has exactly one textual representation.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        if !s.ends_with('Z') {
            return Err(TimeError::NonUtc(s.to_string()));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TimeError::Invalid {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `self` is earlier).
    pub fn secs_since(&self, earlier: Timestamp) -> i64 {
        self.epoch_secs() - earlier.epoch_secs()
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ─── Clock ───────────────────────────────────────────────────────────

/// Supplier of monotonically non-decreasing timestamps.
///
/// The crossing reads the clock when granting permission and when a vehicle
/// attempts to enter the crossing; nothing else is time-dependent.
pub trait Clock: Send + Sync {
    /// The current reading.
    fn now(&self) -> Timestamp;
}

/// Production clock backed by the host's UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Deterministic clock for tests and scripted replays.
///
/// Starts at a fixed instant and moves only when explicitly advanced, so a
/// harness holding an `Arc<ManualClock>` can step time past a permission's
/// validity window and observe lazy expiry.
#[derive(Debug)]
pub struct ManualClock {
    epoch_secs: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            epoch_secs: AtomicI64::new(start.epoch_secs()),
        }
    }

    /// Advance the clock by `secs` seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.epoch_secs.fetch_add(secs as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let secs = self.epoch_secs.load(Ordering::SeqCst);
        // The stored value always originates from a valid Timestamp and only
        // grows, so reconstruction cannot fail.
        Timestamp::from_epoch_secs(secs).unwrap_or_else(|_| Timestamp::now())
    }
}
