//! Fragseek-Media: fragment model, HLS media playlists and fragment locators
//!
//! This crate answers one question for an adaptive streaming pipeline: given
//! the fragments of a level and how far the buffer reaches, which fragment
//! should be requested next.
//!
//! # Modules
//!
//! - `fragment` - Fragment and level snapshots (read-only inputs)
//! - `search` - Ordered search over a fragment sequence
//! - `locator` - PDT projection, PDT lookup, tolerance-aware SN lookup
//! - `hls` - HLS media playlist (m3u8) parsing into level snapshots
//!
//! # Addressing
//!
//! Fragments can be addressed two ways:
//!
//! 1. By wall-clock program date time, which survives discontinuities in the
//!    media timeline ([`locator::calculate_next_pdt`] then
//!    [`locator::find_fragment_by_pdt`]).
//! 2. By buffer position, preferring the fragment that follows the previously
//!    appended one by sequence number ([`locator::find_fragment_by_sn`]).
//!
//! Every locator is a pure function over borrowed inputs; nothing is cached
//! between calls.

pub mod error;
pub mod fragment;
pub mod hls;
pub mod locator;
pub mod search;

pub use error::{Error, Result};
pub use fragment::{Fragment, LevelDetails};
pub use hls::MediaPlaylist;
pub use locator::{
    calculate_next_pdt, classify, find_frag_with_cc, find_fragment_by_pdt, find_fragment_by_sn,
    Placement, ToleranceWindow,
};
