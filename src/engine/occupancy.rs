use std::collections::BTreeMap;

use crate::model::*;

use super::day_split::split_by_day;

// ── Occupancy Map Builder ────────────────────────────────────────

/// A segment whose edge gaps are both below this fraction of a day marks
/// the day full. 0.1% of a day; absorbs float rounding, nothing more.
pub const FULL_DAY_EPSILON: f64 = 0.001;

/// Build the day → occupancy map for a calendar from one resource's
/// bookings.
///
/// Every booking is split across the days it touches; per day the
/// sub-spans are sorted by start and annotated with their fractional
/// position inside the 24h strip. Overlapping sub-spans from different
/// bookings stay separate; merging is the renderer's business, not ours.
/// Empty spans and zero-quantity bookings contribute nothing.
pub fn build_occupancy(bookings: &[Booking]) -> BTreeMap<DayKey, DayOccupancy> {
    occupancy_map(bookings, None)
}

/// Same as [`build_occupancy`], clamped to a query window. Bookings
/// entirely outside `window` drop out; ones straddling its edge are cut
/// at the edge.
pub fn build_occupancy_within(
    bookings: &[Booking],
    window: &Span,
) -> BTreeMap<DayKey, DayOccupancy> {
    occupancy_map(bookings, Some(window))
}

fn occupancy_map(bookings: &[Booking], window: Option<&Span>) -> BTreeMap<DayKey, DayOccupancy> {
    let mut per_day: BTreeMap<DayKey, Vec<Span>> = BTreeMap::new();
    for booking in bookings {
        if booking.quantity == 0 {
            continue;
        }
        let span = match window {
            Some(w) => booking.span.clamp_to(w),
            None => booking.span,
        };
        for (day, part) in split_by_day(&span) {
            per_day.entry(day).or_default().push(part);
        }
    }

    per_day
        .into_iter()
        .map(|(day, mut spans)| {
            // Ties on start break by end so output is fully deterministic.
            spans.sort_by_key(|s| (s.start, s.end));
            let segments: Vec<DaySegment> =
                spans.iter().map(|s| segment_for(day, s)).collect();
            let is_full = segments.iter().any(|seg| {
                seg.left_fraction < FULL_DAY_EPSILON && seg.right_fraction < FULL_DAY_EPSILON
            });
            let occ = DayOccupancy { day, intervals: spans, segments, is_full };
            (day, occ)
        })
        .collect()
}

/// Fractional position of a sub-span within its day, measured from each
/// edge of the strip and clamped to `[0, 1]`.
fn segment_for(day: DayKey, span: &Span) -> DaySegment {
    let day_len = DAY_MS as f64;
    let left = (span.start - day.start()) as f64 / day_len;
    let right = (day.end() - span.end) as f64 / day_len;
    DaySegment {
        left_fraction: left.clamp(0.0, 1.0),
        right_fraction: right.clamp(0.0, 1.0),
        from: span.start,
        to: span.end,
    }
}
