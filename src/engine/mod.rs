mod conflict;
mod day_split;
mod error;
mod occupancy;

pub use conflict::{
    has_capacity_conflict, has_exclusive_conflict, min_available, validate_booking, validate_span,
};
pub use day_split::split_by_day;
pub use error::EngineError;
pub use occupancy::{FULL_DAY_EPSILON, build_occupancy, build_occupancy_within};

use crate::model::*;

// ── Resource-kind dispatch ───────────────────────────────────────

/// Conflict verdict for a candidate against a resource's existing
/// bookings, dispatched on the resource kind.
///
/// Exclusive resources reject any temporal overlap regardless of
/// `requested`; pooled resources admit the candidate while hourly demand
/// stays within capacity. `existing` must already be filtered to the
/// resource and must not contain the booking under edit; the engine does
/// no identity-based exclusion.
pub fn has_conflict(
    kind: &ResourceKind,
    candidate: &Span,
    requested: u32,
    existing: &[Booking],
) -> bool {
    let verdict = match kind {
        ResourceKind::Exclusive => {
            let spans: Vec<Span> = existing.iter().map(|b| b.span).collect();
            has_exclusive_conflict(candidate, &spans)
        }
        ResourceKind::Pooled { capacity } => {
            has_capacity_conflict(candidate, requested, *capacity, existing)
        }
    };
    tracing::debug!(
        ?kind,
        start = candidate.start,
        end = candidate.end,
        requested,
        verdict,
        "conflict check"
    );
    verdict
}

/// Worst-case free units across the candidate range, for display next to
/// the picker ("N free"). An exclusive resource reports 1 or 0.
pub fn remaining(kind: &ResourceKind, candidate: &Span, existing: &[Booking]) -> u32 {
    match kind {
        ResourceKind::Exclusive => {
            let spans: Vec<Span> = existing.iter().map(|b| b.span).collect();
            if has_exclusive_conflict(candidate, &spans) { 0 } else { 1 }
        }
        ResourceKind::Pooled { capacity } => min_available(candidate, *capacity, existing),
    }
}
