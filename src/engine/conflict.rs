use crate::limits::*;
use crate::model::*;

use super::EngineError;

// ── Upstream validation ──────────────────────────────────────────

/// Admission check for caller-supplied spans. The engine itself tolerates
/// anything; forms use this to reject nonsense before it hits the calendar.
pub fn validate_span(span: &Span) -> Result<(), EngineError> {
    if span.is_empty() {
        return Err(EngineError::InvalidInterval(*span));
    }
    if span.start < MIN_VALID_TIMESTAMP_MS || span.end > MAX_VALID_TIMESTAMP_MS {
        return Err(EngineError::LimitExceeded("timestamp out of range"));
    }
    if span.duration_ms() > MAX_SPAN_DURATION_MS {
        return Err(EngineError::LimitExceeded("span too wide"));
    }
    Ok(())
}

pub fn validate_booking(booking: &Booking) -> Result<(), EngineError> {
    validate_span(&booking.span)?;
    if booking.quantity == 0 {
        return Err(EngineError::InvalidQuantity(booking.id));
    }
    Ok(())
}

// ── Exclusive resources ──────────────────────────────────────────

/// Fast path for single-unit resources: any overlap with an existing
/// allocation conflicts, whatever quantity was asked for. No hour
/// quantization needed. An empty candidate never conflicts.
pub fn has_exclusive_conflict(candidate: &Span, existing: &[Span]) -> bool {
    existing.iter().any(|s| s.overlaps(candidate))
}

// ── Pooled resources ─────────────────────────────────────────────

/// Would granting `requested` units over `candidate` push any hour over
/// capacity?
///
/// Demand is evaluated per 1-hour bucket from `candidate.start`, last
/// bucket clipped to `candidate.end`. The domain bills whole hours, so a
/// sub-hour overlap claims its whole bucket. Exact equality still fits:
/// capacity is inclusive. Zero capacity conflicts unconditionally.
pub fn has_capacity_conflict(
    candidate: &Span,
    requested: u32,
    capacity: u32,
    existing: &[Booking],
) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if capacity == 0 {
        return true;
    }
    let mut bucket_start = candidate.start;
    while bucket_start < candidate.end {
        let bucket = Span::new(
            bucket_start,
            candidate.end.min(bucket_start.saturating_add(HOUR_MS)),
        );
        let used = bucket_demand(&bucket, existing);
        if used + requested as u64 > capacity as u64 {
            return true;
        }
        bucket_start = bucket.end;
    }
    false
}

/// Worst-case free units across the candidate range — the same hour-bucket
/// walk as [`has_capacity_conflict`], reduced to a minimum instead of a
/// verdict. Advisory ("N units free across this range"), not a conflict
/// decision. Zero capacity short-circuits to 0; an empty candidate has no
/// bucket to constrain it and reports the full capacity.
pub fn min_available(candidate: &Span, capacity: u32, existing: &[Booking]) -> u32 {
    if capacity == 0 {
        return 0;
    }
    let mut min_free = capacity;
    let mut bucket_start = candidate.start;
    while bucket_start < candidate.end {
        let bucket = Span::new(
            bucket_start,
            candidate.end.min(bucket_start.saturating_add(HOUR_MS)),
        );
        let used = bucket_demand(&bucket, existing);
        let free = (capacity as u64).saturating_sub(used) as u32;
        if free < min_free {
            min_free = free;
            if min_free == 0 {
                break;
            }
        }
        bucket_start = bucket.end;
    }
    min_free
}

/// Units claimed by bookings overlapping one bucket. Zero-quantity
/// bookings add nothing; u64 so adversarial quantities can't wrap.
fn bucket_demand(bucket: &Span, existing: &[Booking]) -> u64 {
    existing
        .iter()
        .filter(|b| b.span.overlaps(bucket))
        .map(|b| b.quantity as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    const H: Ms = HOUR_MS;
    const BASE: Ms = MIN_VALID_TIMESTAMP_MS;

    fn booking(start: Ms, end: Ms, quantity: u32) -> Booking {
        Booking::with_quantity(Ulid::new(), Ulid::new(), Span::new(start, end), quantity)
    }

    // ── validation ────────────────────────────────────────

    #[test]
    fn validate_span_accepts_sane_input() {
        assert!(validate_span(&Span::new(BASE + 9 * H, BASE + 17 * H)).is_ok());
    }

    #[test]
    fn validate_span_rejects_degenerate() {
        let r = validate_span(&Span::new(BASE + H, BASE + H));
        assert!(matches!(r, Err(EngineError::InvalidInterval(_))));
        let r = validate_span(&Span::new(BASE + 2 * H, BASE + H));
        assert!(matches!(r, Err(EngineError::InvalidInterval(_))));
    }

    #[test]
    fn validate_span_rejects_out_of_range() {
        let r = validate_span(&Span::new(MIN_VALID_TIMESTAMP_MS - 1, BASE + H));
        assert!(matches!(r, Err(EngineError::LimitExceeded(_))));
        let r = validate_span(&Span::new(BASE, MAX_VALID_TIMESTAMP_MS + 1));
        assert!(matches!(r, Err(EngineError::LimitExceeded(_))));
    }

    #[test]
    fn validate_span_rejects_oversized() {
        let r = validate_span(&Span::new(BASE, BASE + MAX_SPAN_DURATION_MS + 1));
        assert!(matches!(r, Err(EngineError::LimitExceeded(_))));
    }

    #[test]
    fn validate_booking_rejects_zero_quantity() {
        let b = booking(BASE, BASE + H, 0);
        assert!(matches!(
            validate_booking(&b),
            Err(EngineError::InvalidQuantity(_))
        ));
        let ok = booking(BASE, BASE + H, 1);
        assert!(validate_booking(&ok).is_ok());
    }

    // ── exclusive checker ────────────────────────────────

    #[test]
    fn exclusive_overlap_conflicts() {
        let existing = vec![Span::new(10 * H, 12 * H)];
        assert!(has_exclusive_conflict(&Span::new(11 * H, 13 * H), &existing));
    }

    #[test]
    fn exclusive_adjacent_does_not_conflict() {
        // Half-open: starting exactly where the other ends is fine.
        let existing = vec![Span::new(10 * H, 12 * H)];
        assert!(!has_exclusive_conflict(&Span::new(12 * H, 13 * H), &existing));
        assert!(!has_exclusive_conflict(&Span::new(8 * H, 10 * H), &existing));
    }

    #[test]
    fn exclusive_contained_conflicts() {
        let existing = vec![Span::new(10 * H, 18 * H)];
        assert!(has_exclusive_conflict(&Span::new(12 * H, 13 * H), &existing));
        assert!(has_exclusive_conflict(&Span::new(8 * H, 20 * H), &existing));
    }

    #[test]
    fn exclusive_degenerate_never_conflicts() {
        let existing = vec![Span::new(0, 24 * H)];
        assert!(!has_exclusive_conflict(&Span::new(5 * H, 5 * H), &existing));
        assert!(!has_exclusive_conflict(&Span::new(9 * H, 4 * H), &existing));
    }

    #[test]
    fn exclusive_is_symmetric() {
        let a = Span::new(3 * H, 7 * H);
        let b = Span::new(6 * H, 9 * H);
        assert_eq!(
            has_exclusive_conflict(&a, &[b]),
            has_exclusive_conflict(&b, &[a])
        );
        let c = Span::new(7 * H, 9 * H);
        assert_eq!(
            has_exclusive_conflict(&a, &[c]),
            has_exclusive_conflict(&c, &[a])
        );
    }

    // ── capacity checker ─────────────────────────────────

    #[test]
    fn capacity_exact_fit_is_not_a_conflict() {
        // 2 used + 1 requested == capacity 3 → fits.
        let existing = vec![booking(9 * H, 11 * H, 2)];
        let candidate = Span::new(10 * H, 12 * H);
        assert!(!has_capacity_conflict(&candidate, 1, 3, &existing));
        // One more unit tips it over.
        assert!(has_capacity_conflict(&candidate, 2, 3, &existing));
    }

    #[test]
    fn capacity_zero_always_conflicts() {
        assert!(has_capacity_conflict(&Span::new(0, H), 1, 0, &[]));
        assert!(has_capacity_conflict(&Span::new(0, H), 0, 0, &[]));
    }

    #[test]
    fn capacity_empty_candidate_never_conflicts() {
        let existing = vec![booking(0, 24 * H, 5)];
        assert!(!has_capacity_conflict(&Span::new(3 * H, 3 * H), 1, 1, &existing));
    }

    #[test]
    fn capacity_sub_hour_overlap_claims_the_bucket() {
        // Existing booking touches only the first 10 minutes of the
        // candidate's first hour; whole-hour billing still counts it.
        let existing = vec![booking(9 * H, 10 * H + 600_000, 1)];
        let candidate = Span::new(10 * H, 12 * H);
        assert!(has_capacity_conflict(&candidate, 1, 1, &existing));
    }

    #[test]
    fn capacity_conflict_found_in_middle_bucket() {
        // Peak usage sits one hour inside the range, not at its edges.
        let existing = vec![booking(12 * H, 13 * H, 3)];
        let candidate = Span::new(10 * H, 16 * H);
        assert!(has_capacity_conflict(&candidate, 1, 3, &existing));
        assert!(!has_capacity_conflict(&candidate, 1, 4, &existing));
    }

    #[test]
    fn capacity_last_bucket_is_clipped() {
        // Candidate ends on a half hour; a booking that only overlaps the
        // clipped tail still counts there.
        let existing = vec![booking(12 * H, 14 * H, 1)];
        let candidate = Span::new(10 * H, 12 * H + 1_800_000);
        assert!(has_capacity_conflict(&candidate, 1, 1, &existing));
    }

    #[test]
    fn capacity_monotonic_in_requested() {
        let existing = vec![booking(9 * H, 12 * H, 2), booking(10 * H, 11 * H, 1)];
        let candidate = Span::new(8 * H, 13 * H);
        let mut conflicted = false;
        for requested in 1..=6 {
            let c = has_capacity_conflict(&candidate, requested, 5, &existing);
            // Once true it must stay true for larger requests.
            assert!(!conflicted || c);
            conflicted = c;
        }
        assert!(conflicted);
    }

    #[test]
    fn capacity_zero_quantity_booking_adds_no_demand() {
        let existing = vec![booking(9 * H, 12 * H, 0)];
        assert!(!has_capacity_conflict(&Span::new(9 * H, 12 * H), 1, 1, &existing));
    }

    // ── min_available ────────────────────────────────────

    #[test]
    fn min_available_reports_worst_hour() {
        // Usage peaks at 4 for one hour inside the range, 1 elsewhere.
        let existing = vec![
            booking(8 * H, 20 * H, 1),
            booking(13 * H, 14 * H, 3),
        ];
        let candidate = Span::new(9 * H, 18 * H);
        assert_eq!(min_available(&candidate, 5, &existing), 1);
    }

    #[test]
    fn min_available_unconstrained_range() {
        assert_eq!(min_available(&Span::new(9 * H, 17 * H), 4, &[]), 4);
    }

    #[test]
    fn min_available_zero_capacity() {
        assert_eq!(min_available(&Span::new(0, H), 0, &[]), 0);
    }

    #[test]
    fn min_available_empty_candidate_reports_full_capacity() {
        let existing = vec![booking(0, 24 * H, 7)];
        assert_eq!(min_available(&Span::new(5 * H, 5 * H), 7, &existing), 7);
    }

    #[test]
    fn min_available_floors_at_zero_when_overbooked() {
        // Demand above capacity must not wrap below zero.
        let existing = vec![booking(9 * H, 11 * H, 9)];
        assert_eq!(min_available(&Span::new(9 * H, 11 * H), 5, &existing), 0);
    }

    #[test]
    fn min_available_agrees_with_conflict_verdict() {
        let existing = vec![
            booking(9 * H, 12 * H, 2),
            booking(11 * H, 15 * H, 1),
        ];
        let candidate = Span::new(10 * H, 14 * H);
        let capacity = 4;
        let free = min_available(&candidate, capacity, &existing);
        assert!(!has_capacity_conflict(&candidate, free, capacity, &existing));
        assert!(has_capacity_conflict(&candidate, free + 1, capacity, &existing));
    }
}
