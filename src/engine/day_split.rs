use crate::model::*;

// ── Day Splitter ─────────────────────────────────────────────────

/// Decompose a span into the `(day, sub-span)` pairs it touches.
///
/// Walks the midnight grid starting at the day containing `span.start`;
/// each emitted sub-span is the intersection of one midnight-to-midnight
/// window with the input. The sub-spans are contiguous, non-overlapping,
/// and their union is exactly the input. An empty span yields nothing.
pub fn split_by_day(span: &Span) -> Vec<(DayKey, Span)> {
    if span.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut day = DayKey::of(span.start);
    while day.start() < span.end {
        let part = span.clamp_to(&day.window());
        if !part.is_empty() {
            parts.push((day, part));
        }
        day = day.next();
    }
    parts
}
