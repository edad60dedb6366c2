//! HLS media playlist structures.

use crate::fragment::{Fragment, LevelDetails};
use crate::{Error, Result};
use fragseek_common::time::{format_program_date_time, parse_program_date_time};

/// Media playlist for a single rendition.
#[derive(Debug, Clone)]
pub struct MediaPlaylist {
    /// Target duration in seconds.
    pub target_duration: u32,
    /// Media sequence number of the first segment.
    pub media_sequence: u64,
    /// Playlist type, if declared.
    pub playlist_type: Option<PlaylistType>,
    /// Segment entries.
    pub segments: Vec<SegmentEntry>,
    /// Whether `#EXT-X-ENDLIST` was present.
    pub ended: bool,
}

/// Playlist type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistType {
    Vod,
    Event,
}

/// A segment entry in the playlist.
#[derive(Debug, Clone)]
pub struct SegmentEntry {
    /// Duration in seconds.
    pub duration: f64,
    /// Segment URI.
    pub uri: String,
    /// Optional title.
    pub title: Option<String>,
    /// Discontinuity before this segment.
    pub discontinuity: bool,
    /// Raw `#EXT-X-PROGRAM-DATE-TIME` value attached to this segment.
    pub program_date_time: Option<String>,
}

#[derive(Default)]
struct PendingSegment {
    duration: Option<f64>,
    title: Option<String>,
    discontinuity: bool,
    program_date_time: Option<String>,
}

impl MediaPlaylist {
    /// Parse an M3U8 media playlist.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

        match lines.find(|(_, l)| !l.is_empty()) {
            Some((_, "#EXTM3U")) => {}
            _ => return Err(Error::MissingTag("#EXTM3U")),
        }

        let mut playlist = Self {
            target_duration: 0,
            media_sequence: 0,
            playlist_type: None,
            segments: Vec::new(),
            ended: false,
        };
        let mut pending = PendingSegment::default();
        let mut media_sequence_line = None;

        for (line_no, line) in lines {
            if line.is_empty() {
                continue;
            }

            if let Some(value) = line.strip_prefix("#EXTINF:") {
                let (duration, title) = match value.split_once(',') {
                    Some((d, t)) => (d, Some(t.trim()).filter(|t| !t.is_empty())),
                    None => (value, None),
                };
                let duration: f64 = duration.trim().parse().map_err(|_| {
                    Error::invalid_playlist(line_no, format!("bad EXTINF duration '{duration}'"))
                })?;
                if !duration.is_finite() || duration < 0.0 {
                    return Err(Error::invalid_playlist(
                        line_no,
                        format!("EXTINF duration out of range: {duration}"),
                    ));
                }
                pending.duration = Some(duration);
                pending.title = title.map(str::to_string);
            } else if let Some(value) = line.strip_prefix("#EXT-X-TARGETDURATION:") {
                playlist.target_duration = value.trim().parse().map_err(|_| {
                    Error::invalid_playlist(line_no, format!("bad target duration '{value}'"))
                })?;
            } else if let Some(value) = line.strip_prefix("#EXT-X-MEDIA-SEQUENCE:") {
                playlist.media_sequence = value.trim().parse().map_err(|_| {
                    Error::invalid_playlist(line_no, format!("bad media sequence '{value}'"))
                })?;
                media_sequence_line = Some(line_no);
            } else if let Some(value) = line.strip_prefix("#EXT-X-PLAYLIST-TYPE:") {
                playlist.playlist_type = match value.trim() {
                    "VOD" => Some(PlaylistType::Vod),
                    "EVENT" => Some(PlaylistType::Event),
                    other => {
                        return Err(Error::invalid_playlist(
                            line_no,
                            format!("unknown playlist type '{other}'"),
                        ))
                    }
                };
            } else if let Some(value) = line.strip_prefix("#EXT-X-PROGRAM-DATE-TIME:") {
                pending.program_date_time = Some(value.trim().to_string());
            } else if line == "#EXT-X-DISCONTINUITY" {
                pending.discontinuity = true;
            } else if line == "#EXT-X-ENDLIST" {
                playlist.ended = true;
            } else if line.starts_with('#') {
                // Unknown tags and comments.
                continue;
            } else {
                let duration = pending.duration.take().ok_or_else(|| {
                    Error::invalid_playlist(line_no, format!("segment '{line}' has no EXTINF"))
                })?;
                let pending = std::mem::take(&mut pending);
                playlist.segments.push(SegmentEntry {
                    duration,
                    uri: line.to_string(),
                    title: pending.title,
                    discontinuity: pending.discontinuity,
                    program_date_time: pending.program_date_time,
                });
            }
        }

        // Every segment needs a sequence number that fits in a u64.
        if let Some(last_offset) = playlist.segments.len().checked_sub(1) {
            let last_sn = u64::try_from(last_offset)
                .ok()
                .and_then(|offset| playlist.media_sequence.checked_add(offset));
            if last_sn.is_none() {
                return Err(Error::invalid_playlist(
                    media_sequence_line.unwrap_or(1),
                    format!(
                        "media sequence {} overflows with {} segments",
                        playlist.media_sequence,
                        playlist.segments.len()
                    ),
                ));
            }
        }

        Ok(playlist)
    }

    /// Build a level snapshot with media times and program date times
    /// resolved for every fragment.
    ///
    /// Media time starts at 0 and accumulates durations. A fragment without its
    /// own `#EXT-X-PROGRAM-DATE-TIME` continues from the previous fragment's
    /// end; fragments before the first tag are back-filled from it.
    ///
    /// Sequence numbers saturate at `u64::MAX`; [`MediaPlaylist::parse`]
    /// rejects playlists where that would happen.
    pub fn to_level_details(&self) -> LevelDetails {
        let mut fragments: Vec<Fragment> = Vec::with_capacity(self.segments.len());
        let mut start = 0.0;
        let mut cc = 0u32;
        let mut first_tagged: Option<(usize, String)> = None;

        for (i, entry) in self.segments.iter().enumerate() {
            if entry.discontinuity {
                cc += 1;
            }

            let pdt = match entry.program_date_time.as_deref() {
                Some(raw) => {
                    let parsed = parse_program_date_time(raw);
                    if parsed.is_none() {
                        tracing::debug!(value = raw, "ignoring unparseable program date time");
                    } else if first_tagged.is_none() {
                        first_tagged = Some((i, raw.to_string()));
                    }
                    parsed
                }
                None => fragments.last().and_then(Fragment::end_pdt),
            };

            let mut fragment = Fragment::new(
                self.media_sequence.saturating_add(i as u64),
                start,
                entry.duration,
            )
                .with_cc(cc)
                .with_uri(entry.uri.clone());
            fragment.program_date_time = pdt;
            fragments.push(fragment);

            start += entry.duration;
        }

        // The level anchor refers to the first fragment.
        let program_date_time = first_tagged.map(|(index, raw)| {
            for i in (0..index).rev() {
                let next = fragments[i + 1].pdt();
                let duration = fragments[i].duration;
                fragments[i].program_date_time = next.map(|pdt| pdt - duration * 1000.0);
            }
            if index == 0 {
                raw
            } else {
                fragments[0]
                    .pdt()
                    .and_then(format_program_date_time)
                    .unwrap_or(raw)
            }
        });

        LevelDetails {
            program_date_time,
            start_sn: self.media_sequence,
            target_duration: self.target_duration as f64,
            live: !self.ended,
            fragments,
        }
    }
}

impl std::str::FromStr for MediaPlaylist {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
