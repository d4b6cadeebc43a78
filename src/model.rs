use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds on the local clock — the only time type.
pub type Ms = i64;

/// One calendar day in milliseconds.
pub const DAY_MS: Ms = 86_400_000;

/// One hour in milliseconds, the capacity-check quantization unit.
pub const HOUR_MS: Ms = 3_600_000;

/// Half-open interval `[start, end)`.
///
/// A span with `start >= end` is *empty*: it contributes nothing to
/// occupancy and never overlaps anything, including itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration_ms(&self) -> Ms {
        if self.is_empty() { 0 } else { self.end - self.start }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }

    /// Intersection with `other`. The result may be empty.
    pub fn clamp_to(&self, other: &Span) -> Span {
        Span::new(self.start.max(other.start), self.end.min(other.end))
    }
}

/// One local calendar date: the `[k·DAY_MS, (k+1)·DAY_MS)` window.
///
/// Two instants map to the same key iff they fall within the same local
/// midnight-to-midnight window. Ordered, so a `BTreeMap` keyed by `DayKey`
/// iterates in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey(i64);

impl DayKey {
    /// The day containing instant `t`. Floor division, so instants before
    /// the epoch land on the correct (negative-index) day.
    pub fn of(t: Ms) -> Self {
        Self(t.div_euclid(DAY_MS))
    }

    /// Local midnight opening this day.
    pub fn start(&self) -> Ms {
        self.0 * DAY_MS
    }

    /// Local midnight closing this day (exclusive).
    pub fn end(&self) -> Ms {
        (self.0 + 1) * DAY_MS
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// The full midnight-to-midnight window.
    pub fn window(&self) -> Span {
        Span::new(self.start(), self.end())
    }
}

/// How a resource admits concurrent bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A single unit (a specific room or hall). Any temporal overlap
    /// between bookings is disallowed.
    Exclusive,
    /// N interchangeable units (e.g. beds in a bunk room). Bookings may
    /// coexist while concurrent demand stays within `capacity`.
    Pooled { capacity: u32 },
}

impl ResourceKind {
    pub fn capacity(&self) -> u32 {
        match self {
            ResourceKind::Exclusive => 1,
            ResourceKind::Pooled { capacity } => *capacity,
        }
    }
}

/// One reservation of a resource over a span.
///
/// `quantity` is the number of pooled units claimed; it is only meaningful
/// for pooled resources and defaults to 1. A quantity of 0 is invalid input
/// (see `validate_booking`) and contributes zero demand if it slips through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub resource_id: Ulid,
    pub span: Span,
    pub quantity: u32,
}

impl Booking {
    pub fn new(id: Ulid, resource_id: Ulid, span: Span) -> Self {
        Self { id, resource_id, span, quantity: 1 }
    }

    pub fn with_quantity(id: Ulid, resource_id: Ulid, span: Span, quantity: u32) -> Self {
        Self { id, resource_id, span, quantity }
    }
}

// ── Day-level render output ──────────────────────────────────────

/// Where within a day's 24-hour strip an occupied sub-span sits, as
/// fractions of the day measured from each edge. `left_fraction` is the
/// gap before the sub-span, `right_fraction` the gap after it; both are
/// clamped to `[0, 1]` and sum to at most 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySegment {
    pub left_fraction: f64,
    pub right_fraction: f64,
    pub from: Ms,
    pub to: Ms,
}

/// Everything a calendar cell needs to paint one day.
///
/// `intervals` and `segments` run in lockstep, ascending by start.
/// `is_full` is a display shortcut (some segment covers the whole day
/// within epsilon), not a capacity statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOccupancy {
    pub day: DayKey,
    pub intervals: Vec<Span>,
    pub segments: Vec<DaySegment>,
    pub is_full: bool,
}
