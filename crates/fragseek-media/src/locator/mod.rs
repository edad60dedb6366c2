//! Fragment locators.
//!
//! All locators are pure functions of their arguments. A caller typically
//! uses [`find_fragment_by_sn`] while playback is linear, and switches to
//! [`calculate_next_pdt`] + [`find_fragment_by_pdt`] after a discontinuity or
//! seek, falling back to the SN locator when no fragment carries a matching
//! program date time.

mod discontinuity;
mod pdt;
mod sn;
mod tolerance;

pub use discontinuity::find_frag_with_cc;
pub use pdt::{calculate_next_pdt, find_fragment_by_pdt};
pub use sn::find_fragment_by_sn;
pub use tolerance::{classify, Placement, ToleranceWindow};
