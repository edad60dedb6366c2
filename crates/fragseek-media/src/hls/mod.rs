//! HLS media playlist parsing.
//!
//! This module turns M3U8 media playlists into level snapshots the locators
//! can work on.

mod playlist;

pub use playlist::{MediaPlaylist, PlaylistType, SegmentEntry};
