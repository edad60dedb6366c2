//! Program date time projection and lookup.

use crate::fragment::{Fragment, LevelDetails};

/// Project the program date time (ms since epoch) of the next fragment to load.
///
/// * `start` - PTS in seconds of the first fragment of the level
/// * `buffer_end` - end in seconds of the buffered range holding the playhead
/// * `frag_previous` - last fragment appended to the buffer
///
/// Chaining from `frag_previous` is preferred over the level anchor since it
/// stays correct across discontinuities in the level's own time base. Returns
/// `None` when neither source carries a usable program date time.
pub fn calculate_next_pdt(
    start: f64,
    buffer_end: f64,
    frag_previous: Option<&Fragment>,
    level_details: &LevelDetails,
) -> Option<f64> {
    if let Some(end_pdt) = frag_previous.and_then(Fragment::end_pdt) {
        tracing::trace!(pdt = end_pdt, "next pdt chained from previous fragment");
        return Some(end_pdt);
    }

    let anchor = level_details.program_date_time_millis()?;
    let pdt = buffer_end * 1000.0 + anchor - start * 1000.0;
    tracing::trace!(pdt, anchor, "next pdt projected from level anchor");
    Some(pdt).filter(|pdt| pdt.is_finite())
}

/// Find the first fragment whose end program date time is strictly greater
/// than `pdt_value`.
///
/// Returns `None` for an empty sequence, for an absent or zero target, and
/// for targets outside `[fragments[0].pdt, fragments[last].end_pdt)`.
pub fn find_fragment_by_pdt(fragments: &[Fragment], pdt_value: Option<f64>) -> Option<&Fragment> {
    let pdt_value = pdt_value.filter(|pdt| *pdt != 0.0 && pdt.is_finite())?;
    let first = fragments.first()?;
    let last = fragments.last()?;

    // Quick bounds checks before scanning.
    if pdt_value < first.pdt()? || pdt_value >= last.end_pdt()? {
        tracing::trace!(pdt_value, "pdt outside of fragment window");
        return None;
    }

    fragments
        .iter()
        .find(|fragment| fragment.end_pdt().is_some_and(|end| end > pdt_value))
}
