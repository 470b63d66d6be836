use crate::models::Payload;

/// Compares the canonical serializations of two documents.
///
/// Object keys keep their received order, so the same data under a different
/// key order compares unequal. Numbers were canonicalized on decode, so `5`
/// and `5.0` compare equal. An absent baseline never matches.
pub fn snapshots_equal(current: &Payload, baseline: Option<&Payload>) -> bool {
    let Some(baseline) = baseline else {
        return false;
    };
    match (
        serde_json::to_string(&current.raw),
        serde_json::to_string(&baseline.raw),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
