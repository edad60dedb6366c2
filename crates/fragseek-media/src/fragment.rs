//! Fragment and level snapshots.
//!
//! These are the read-only inputs of the locators. They are produced by a
//! playlist refresh (see [`crate::hls`]) or loaded from a JSON snapshot, and
//! borrowed for the duration of a single locate call.

use crate::{Error, Result};
use fragseek_common::time::parse_program_date_time;

/// A single media fragment (HLS segment) of a level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
pub struct Fragment {
    /// Sequence number, strictly increasing within a level.
    pub sn: u64,
    /// Start on the media timeline in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Wall-clock start in milliseconds since the epoch.
    #[cfg_attr(
        feature = "serialize",
        serde(rename = "pdt", default, skip_serializing_if = "Option::is_none")
    )]
    pub program_date_time: Option<f64>,
    /// Known presentation timestamp drift for this fragment, in seconds.
    #[cfg_attr(
        feature = "serialize",
        serde(rename = "deltaPTS", default, skip_serializing_if = "Option::is_none")
    )]
    pub delta_pts: Option<f64>,
    /// Discontinuity counter.
    #[cfg_attr(feature = "serialize", serde(default))]
    pub cc: u32,
    /// Segment URI as listed in the playlist.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub uri: Option<String>,
}

impl Fragment {
    /// Create a fragment with no wall-clock information.
    pub fn new(sn: u64, start: f64, duration: f64) -> Self {
        Self {
            sn,
            start,
            duration,
            program_date_time: None,
            delta_pts: None,
            cc: 0,
            uri: None,
        }
    }

    pub fn with_pdt(mut self, pdt: f64) -> Self {
        self.program_date_time = Some(pdt);
        self
    }

    pub fn with_delta_pts(mut self, delta_pts: f64) -> Self {
        self.delta_pts = Some(delta_pts);
        self
    }

    pub fn with_cc(mut self, cc: u32) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Wall-clock start in milliseconds.
    ///
    /// Zero and non-finite values mean "no program date time".
    pub fn pdt(&self) -> Option<f64> {
        self.program_date_time
            .filter(|pdt| *pdt != 0.0 && pdt.is_finite())
    }

    /// Wall-clock end in milliseconds, `pdt + duration * 1000`.
    pub fn end_pdt(&self) -> Option<f64> {
        self.pdt().map(|pdt| pdt + self.duration * 1000.0)
    }

    /// End on the media timeline in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Metadata of the currently selected quality level.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
pub struct LevelDetails {
    /// ISO-8601 wall-clock time of the first fragment.
    #[cfg_attr(
        feature = "serialize",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub program_date_time: Option<String>,
    /// Fragments ordered by sequence number.
    #[cfg_attr(feature = "serialize", serde(default))]
    pub fragments: Vec<Fragment>,
    /// Sequence number of the first fragment.
    #[cfg_attr(feature = "serialize", serde(default))]
    pub start_sn: u64,
    /// Target fragment duration in seconds.
    #[cfg_attr(feature = "serialize", serde(default))]
    pub target_duration: f64,
    /// Whether the playlist may still grow (no `#EXT-X-ENDLIST`).
    #[cfg_attr(feature = "serialize", serde(default))]
    pub live: bool,
}

impl LevelDetails {
    /// Create level details from an ordered fragment list.
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        let start_sn = fragments.first().map(|f| f.sn).unwrap_or(0);
        let target_duration = fragments
            .iter()
            .map(|f| f.duration)
            .fold(0.0, f64::max)
            .ceil();
        Self {
            program_date_time: None,
            fragments,
            start_sn,
            target_duration,
            live: false,
        }
    }

    pub fn with_program_date_time(mut self, program_date_time: impl Into<String>) -> Self {
        self.program_date_time = Some(program_date_time.into());
        self
    }

    /// Parsed wall-clock anchor in milliseconds, if present and valid.
    pub fn program_date_time_millis(&self) -> Option<f64> {
        self.program_date_time
            .as_deref()
            .and_then(parse_program_date_time)
    }

    /// Media timeline start of the first fragment.
    pub fn start(&self) -> f64 {
        self.fragments.first().map(|f| f.start).unwrap_or(0.0)
    }

    /// Media timeline end of the last fragment.
    pub fn end(&self) -> f64 {
        self.fragments.last().map(Fragment::end).unwrap_or(0.0)
    }

    /// Total duration covered by the fragments.
    pub fn total_duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Look up a fragment by sequence number using its offset from the first.
    pub fn fragment_by_sn(&self, sn: u64) -> Option<&Fragment> {
        let first = self.fragments.first()?;
        let index = usize::try_from(sn.checked_sub(first.sn)?).ok()?;
        self.fragments.get(index).filter(|f| f.sn == sn)
    }

    /// Check ordering invariants of the fragment sequence.
    pub fn validate(&self) -> Result<()> {
        for pair in self.fragments.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.sn <= prev.sn {
                return Err(Error::invalid_sequence(format!(
                    "sn {} follows sn {}",
                    next.sn, prev.sn
                )));
            }
            if let (Some(a), Some(b)) = (prev.pdt(), next.pdt()) {
                if b < a {
                    return Err(Error::invalid_sequence(format!(
                        "pdt of sn {} precedes pdt of sn {}",
                        next.sn, prev.sn
                    )));
                }
            }
        }
        for fragment in &self.fragments {
            if !fragment.start.is_finite() || !fragment.duration.is_finite() {
                return Err(Error::invalid_sequence(format!(
                    "sn {} has a non-finite start or duration",
                    fragment.sn
                )));
            }
        }
        Ok(())
    }

    /// Load a level snapshot from JSON and validate it.
    #[cfg(feature = "serialize")]
    pub fn from_json(json: &str) -> Result<Self> {
        let mut details: LevelDetails = serde_json::from_str(json)?;
        if let Some(first) = details.fragments.first() {
            details.start_sn = first.sn;
        }
        details.validate()?;
        Ok(details)
    }

    /// Serialize a level snapshot as pretty JSON.
    #[cfg(feature = "serialize")]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> LevelDetails {
        LevelDetails::from_fragments(vec![
            Fragment::new(5, 0.0, 4.0).with_pdt(1_000_000.0),
            Fragment::new(6, 4.0, 4.0).with_pdt(1_004_000.0),
            Fragment::new(7, 8.0, 3.5).with_pdt(1_008_000.0),
        ])
    }

    #[test]
    fn test_pdt_zero_means_absent() {
        let frag = Fragment::new(0, 0.0, 2.0).with_pdt(0.0);
        assert_eq!(frag.pdt(), None);
        assert_eq!(frag.end_pdt(), None);
    }

    #[test]
    fn test_end_pdt_derived() {
        let frag = Fragment::new(0, 0.0, 2.5).with_pdt(10_000.0);
        assert_eq!(frag.end_pdt(), Some(12_500.0));
        assert_eq!(frag.end(), 2.5);
    }

    #[test]
    fn test_level_bounds() {
        let level = level();
        assert_eq!(level.start_sn, 5);
        assert_eq!(level.start(), 0.0);
        assert_eq!(level.end(), 11.5);
        assert_eq!(level.target_duration, 4.0);
    }

    #[test]
    fn test_fragment_by_sn() {
        let level = level();
        assert_eq!(level.fragment_by_sn(6).map(|f| f.start), Some(4.0));
        assert!(level.fragment_by_sn(4).is_none());
        assert!(level.fragment_by_sn(8).is_none());
    }

    #[test]
    fn test_validate_rejects_unordered_sn() {
        let level = LevelDetails::from_fragments(vec![
            Fragment::new(3, 0.0, 4.0),
            Fragment::new(3, 4.0, 4.0),
        ]);
        assert!(matches!(level.validate(), Err(Error::InvalidSequence(_))));
        assert!(self::level().validate().is_ok());
    }

    #[test]
    fn test_program_date_time_millis() {
        let level = level().with_program_date_time("1970-01-01T00:16:40.000Z");
        assert_eq!(level.program_date_time_millis(), Some(1_000_000.0));

        let level = self::level().with_program_date_time("garbage");
        assert_eq!(level.program_date_time_millis(), None);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_json_snapshot() {
        let json = r#"{
            "programDateTime": "2024-01-01T00:00:00Z",
            "fragments": [
                {"sn": 10, "start": 0, "duration": 6, "pdt": 1704067200000},
                {"sn": 11, "start": 6, "duration": 6, "deltaPTS": 0.02}
            ]
        }"#;
        let level = LevelDetails::from_json(json).unwrap();
        assert_eq!(level.start_sn, 10);
        assert_eq!(level.fragments[1].delta_pts, Some(0.02));
        assert_eq!(level.fragments[1].pdt(), None);

        let back = LevelDetails::from_json(&level.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, level);
    }
}
