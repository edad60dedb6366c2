//! Lookup by discontinuity counter.

use crate::fragment::Fragment;
use crate::search::binary_search;

/// Find a fragment belonging to discontinuity `cc`.
///
/// Used to realign on another level after a switch across a discontinuity,
/// where sequence numbers and media times no longer line up.
pub fn find_frag_with_cc(fragments: &[Fragment], cc: u32) -> Option<&Fragment> {
    binary_search(fragments, |candidate| candidate.cc.cmp(&cc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_with_cc() {
        let frags: Vec<Fragment> = [0, 0, 1, 1, 1, 3]
            .iter()
            .enumerate()
            .map(|(i, cc)| Fragment::new(i as u64, i as f64 * 2.0, 2.0).with_cc(*cc))
            .collect();

        assert_eq!(find_frag_with_cc(&frags, 0).map(|f| f.cc), Some(0));
        assert_eq!(find_frag_with_cc(&frags, 1).map(|f| f.cc), Some(1));
        assert_eq!(find_frag_with_cc(&frags, 3).map(|f| f.sn), Some(5));
        assert!(find_frag_with_cc(&frags, 2).is_none());
        assert!(find_frag_with_cc(&frags, 4).is_none());
        assert!(find_frag_with_cc(&[], 0).is_none());
    }
}
