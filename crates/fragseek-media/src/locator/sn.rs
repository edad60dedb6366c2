//! Tolerance-aware lookup by buffer position.

use super::tolerance::{Placement, ToleranceWindow};
use crate::fragment::Fragment;
use crate::search::binary_search;

/// Find the next fragment to load given the end of the buffered range.
///
/// * `frag_previous` - last fragment appended to the buffer
/// * `fragments` - fragments of the current level, ordered by sn
/// * `buffer_end` - end in seconds of the buffered range holding the playhead
/// * `end` - media timeline end of the level in seconds
/// * `max_frag_lookup_tolerance` - lookup tolerance in seconds
///
/// The fragment following `frag_previous` by sequence number is returned
/// directly when it matches the buffer end. Otherwise the whole sequence is
/// searched with the tolerance predicate. Returns `None` once the buffer
/// reaches `end`.
pub fn find_fragment_by_sn<'a>(
    frag_previous: Option<&Fragment>,
    fragments: &'a [Fragment],
    buffer_end: f64,
    end: f64,
    max_frag_lookup_tolerance: f64,
) -> Option<&'a Fragment> {
    if buffer_end >= end {
        return None;
    }

    let mut tolerance = max_frag_lookup_tolerance.max(0.0);
    // Near the end of the level, tolerance must not skip the last fragment.
    if buffer_end > end - tolerance {
        tolerance = 0.0;
    }
    let window = ToleranceWindow::new(buffer_end, tolerance);

    let first = fragments.first()?;
    let frag_next = frag_previous.and_then(|prev| {
        let offset = prev.sn.checked_sub(first.sn)?.checked_add(1)?;
        fragments.get(usize::try_from(offset).ok()?)
    });

    if let Some(next) = frag_next {
        if window.classify(next) == Placement::Match {
            tracing::trace!(sn = next.sn, buffer_end, "sequential fragment matches buffer end");
            return Some(next);
        }
    }

    let found = binary_search(fragments, |candidate| window.classify(candidate).as_ordering());
    tracing::trace!(
        sn = found.map(|f| f.sn),
        buffer_end,
        tolerance,
        "searched fragments by buffer end"
    );
    found
}
