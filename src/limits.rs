//! Admission bounds for caller-supplied spans and bookings.
//!
//! The engine itself degrades malformed input to safe outputs; these
//! limits exist for the upstream validation entry points so a form layer
//! can reject nonsense before it reaches the calendar.

use crate::model::{DAY_MS, Ms};

/// Earliest accepted instant: 2000-01-01 00:00:00.
pub const MIN_VALID_TIMESTAMP_MS: Ms = 946_684_800_000;

/// Latest accepted instant: 2100-01-01 00:00:00.
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;

/// Widest accepted single booking: one year plus leap slack.
pub const MAX_SPAN_DURATION_MS: Ms = 366 * DAY_MS;
