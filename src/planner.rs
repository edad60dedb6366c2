//! Next-fragment policy.
//!
//! Decides which locator to consult for the next request: program date time
//! after a discontinuity or seek, sequence/buffer position otherwise, with the
//! latter as fallback when wall-clock lookup comes up empty.

use crate::config::LocatorConfig;
use fragseek_media::{
    calculate_next_pdt, find_fragment_by_pdt, find_fragment_by_sn, Fragment, LevelDetails,
};
use serde::Serialize;

/// Playback state a next-fragment decision is made from.
#[derive(Debug, Clone, Default)]
pub struct NextFragmentRequest {
    /// End in seconds of the buffered range holding the playhead.
    pub buffer_end: f64,
    /// Media timeline end of the level; defaults to the end of its last fragment.
    pub end: Option<f64>,
    /// Sequence number of the last appended fragment.
    pub previous_sn: Option<u64>,
    /// Last appended fragment when it came from another level. Takes
    /// precedence over `previous_sn`.
    pub previous_fragment: Option<Fragment>,
    /// PTS of the first fragment of the level; defaults to its media start.
    pub start: Option<f64>,
    /// Set after a discontinuity or seek.
    pub discontinuity: bool,
}

/// How a fragment was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    ProgramDateTime,
    Sequence,
}

/// The fragment picked for the next request.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub fragment: &'a Fragment,
    pub strategy: Strategy,
    /// Projected program date time, when one was computed.
    pub projected_pdt: Option<f64>,
}

/// Pick the next fragment of `level` to load.
pub fn plan_next_fragment<'a>(
    level: &'a LevelDetails,
    request: &NextFragmentRequest,
    config: &LocatorConfig,
) -> Option<Selection<'a>> {
    let fragments = level.fragments.as_slice();
    let end = request.end.unwrap_or_else(|| level.end());
    let start = request.start.unwrap_or_else(|| level.start());

    let previous = request.previous_fragment.as_ref().or_else(|| {
        request.previous_sn.and_then(|sn| {
            let found = level.fragment_by_sn(sn);
            if found.is_none() {
                tracing::debug!(sn, "previous fragment is no longer in the level");
            }
            found
        })
    });

    let mut projected_pdt = None;
    if request.discontinuity && config.use_program_date_time {
        projected_pdt = calculate_next_pdt(start, request.buffer_end, previous, level);
        if let Some(fragment) = find_fragment_by_pdt(fragments, projected_pdt) {
            tracing::debug!(
                sn = fragment.sn,
                pdt = projected_pdt,
                "Located fragment by program date time"
            );
            return Some(Selection {
                fragment,
                strategy: Strategy::ProgramDateTime,
                projected_pdt,
            });
        }
        tracing::debug!(
            pdt = projected_pdt,
            "No fragment by program date time, falling back to buffer position"
        );
    }

    let fragment = find_fragment_by_sn(
        previous,
        fragments,
        request.buffer_end,
        end,
        config.max_frag_lookup_tolerance,
    );

    match fragment {
        Some(fragment) => {
            tracing::debug!(
                sn = fragment.sn,
                buffer_end = request.buffer_end,
                "Located fragment by buffer position"
            );
            Some(Selection {
                fragment,
                strategy: Strategy::Sequence,
                projected_pdt,
            })
        }
        None => {
            tracing::info!(
                buffer_end = request.buffer_end,
                end,
                "No fragment left to load"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: f64 = 1_700_000_000_000.0;

    fn level_with_pdt() -> LevelDetails {
        // sn 20..25, 4s each; media time restarts at 100 (e.g. after a live window slide).
        let fragments = (0..6)
            .map(|i| {
                Fragment::new(20 + i, 100.0 + i as f64 * 4.0, 4.0)
                    .with_pdt(BASE + i as f64 * 4_000.0)
            })
            .collect();
        LevelDetails::from_fragments(fragments)
    }

    #[test]
    fn test_sequence_strategy_by_default() {
        let level = level_with_pdt();
        let request = NextFragmentRequest {
            buffer_end: 108.05,
            previous_sn: Some(21),
            ..Default::default()
        };
        let selection = plan_next_fragment(&level, &request, &LocatorConfig::default()).unwrap();
        assert_eq!(selection.fragment.sn, 22);
        assert_eq!(selection.strategy, Strategy::Sequence);
        assert_eq!(selection.projected_pdt, None);
    }

    #[test]
    fn test_pdt_strategy_after_discontinuity() {
        let level = level_with_pdt();
        // Media time no longer lines up, but the previous fragment's pdt does.
        let request = NextFragmentRequest {
            buffer_end: 3.0,
            previous_sn: Some(22),
            discontinuity: true,
            ..Default::default()
        };
        let selection = plan_next_fragment(&level, &request, &LocatorConfig::default()).unwrap();
        assert_eq!(selection.fragment.sn, 23);
        assert_eq!(selection.strategy, Strategy::ProgramDateTime);
        assert_eq!(selection.projected_pdt, Some(BASE + 12_000.0));
    }

    #[test]
    fn test_pdt_chains_from_other_level() {
        let level = level_with_pdt();
        // Last fragment of the level we switched away from: sn and media time
        // mean nothing here, its end pdt lands inside sn 22.
        let previous = Fragment::new(7, 50.0, 6.0).with_pdt(BASE + 2_000.0);
        let request = NextFragmentRequest {
            buffer_end: 56.0,
            previous_fragment: Some(previous),
            discontinuity: true,
            ..Default::default()
        };
        let selection = plan_next_fragment(&level, &request, &LocatorConfig::default()).unwrap();
        assert_eq!(selection.strategy, Strategy::ProgramDateTime);
        assert_eq!(selection.projected_pdt, Some(BASE + 8_000.0));
        assert_eq!(selection.fragment.sn, 22);
    }

    #[test]
    fn test_pdt_disabled_uses_sequence() {
        let level = level_with_pdt();
        let request = NextFragmentRequest {
            buffer_end: 112.0,
            previous_sn: Some(22),
            discontinuity: true,
            ..Default::default()
        };
        let config = LocatorConfig {
            use_program_date_time: false,
            ..Default::default()
        };
        let selection = plan_next_fragment(&level, &request, &config).unwrap();
        assert_eq!(selection.strategy, Strategy::Sequence);
        assert_eq!(selection.fragment.sn, 23);
    }

    #[test]
    fn test_pdt_miss_falls_back_to_sequence() {
        let fragments = (0..3)
            .map(|i| Fragment::new(i, i as f64 * 6.0, 6.0))
            .collect();
        let level = LevelDetails::from_fragments(fragments);
        let request = NextFragmentRequest {
            buffer_end: 7.0,
            discontinuity: true,
            ..Default::default()
        };
        let selection = plan_next_fragment(&level, &request, &LocatorConfig::default()).unwrap();
        assert_eq!(selection.strategy, Strategy::Sequence);
        assert_eq!(selection.fragment.sn, 1);
    }

    #[test]
    fn test_fully_buffered() {
        let level = level_with_pdt();
        let request = NextFragmentRequest {
            buffer_end: 124.0,
            ..Default::default()
        };
        assert!(plan_next_fragment(&level, &request, &LocatorConfig::default()).is_none());
    }
}
