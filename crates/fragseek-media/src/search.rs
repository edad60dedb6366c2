//! Ordered search over a fragment sequence.

use std::cmp::Ordering;

/// Binary search `list` with a three-way comparator.
///
/// The comparator reports where the probed element sits relative to the
/// target: `Less` when the target lies later in the list, `Greater` when it
/// lies earlier, `Equal` on a match. Results must be monotone over the list.
///
/// Probes start at `(min + max) / 2` over inclusive bounds, so for a given
/// list and comparator the returned element is always the same one even when
/// several elements compare `Equal`.
pub fn binary_search<T, F>(list: &[T], mut compare: F) -> Option<&T>
where
    F: FnMut(&T) -> Ordering,
{
    let mut min = 0usize;
    // Exclusive upper bound.
    let mut max = list.len();

    while min < max {
        let current = (min + max - 1) / 2;
        let element = &list[current];
        match compare(element) {
            Ordering::Less => min = current + 1,
            Ordering::Greater => max = current,
            Ordering::Equal => return Some(element),
        }
    }

    None
}
