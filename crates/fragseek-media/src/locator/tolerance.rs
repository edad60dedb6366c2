//! Tolerance predicate used by the ordered fragment search.

use crate::fragment::Fragment;
use std::cmp::Ordering;

/// Where a candidate fragment sits relative to the fragment being looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The buffer already covers this candidate; the wanted fragment comes after it.
    After,
    /// The candidate contains the buffer end (within tolerance).
    Match,
    /// The candidate starts past the buffer end; the wanted fragment comes before it.
    Before,
}

impl Placement {
    /// Ordering of the candidate relative to the target, as consumed by
    /// [`crate::search::binary_search`].
    pub fn as_ordering(self) -> Ordering {
        match self {
            Self::After => Ordering::Less,
            Self::Match => Ordering::Equal,
            Self::Before => Ordering::Greater,
        }
    }
}

impl From<Placement> for Ordering {
    fn from(placement: Placement) -> Self {
        placement.as_ordering()
    }
}

/// Buffer position and lookup tolerance a candidate is classified against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceWindow {
    /// End of the buffered range in seconds.
    pub buffer_end: f64,
    /// Maximum lookup tolerance in seconds, never negative.
    pub max_lookup_tolerance: f64,
}

impl ToleranceWindow {
    /// Create a window. Negative or NaN tolerances are clamped to zero.
    pub fn new(buffer_end: f64, max_lookup_tolerance: f64) -> Self {
        Self {
            buffer_end,
            max_lookup_tolerance: max_lookup_tolerance.max(0.0),
        }
    }

    /// Tolerance applied to `candidate`: the configured tolerance, capped by
    /// the candidate's own duration plus known drift.
    pub fn candidate_tolerance(&self, candidate: &Fragment) -> f64 {
        let drift = candidate.delta_pts.unwrap_or(0.0);
        self.max_lookup_tolerance.min(candidate.duration + drift)
    }

    /// Classify `candidate` against the buffer end.
    pub fn classify(&self, candidate: &Fragment) -> Placement {
        let tolerance = self.candidate_tolerance(candidate);

        if candidate.start + candidate.duration - tolerance <= self.buffer_end {
            Placement::After
        } else if candidate.start - tolerance > self.buffer_end && candidate.start != 0.0 {
            // A level or discontinuity starting at 0 is never "too far ahead".
            Placement::Before
        } else {
            Placement::Match
        }
    }
}

/// Classify `candidate` against `buffer_end` with `max_lookup_tolerance`.
pub fn classify(candidate: &Fragment, buffer_end: f64, max_lookup_tolerance: f64) -> Placement {
    ToleranceWindow::new(buffer_end, max_lookup_tolerance).classify(candidate)
}
