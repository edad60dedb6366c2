//! Fragseek-Common: shared error types and wall-clock time helpers.
//!
//! - **Error Handling**: common error type and result alias
//! - **Time**: parsing of `EXT-X-PROGRAM-DATE-TIME` style timestamps
//!
//! # Examples
//!
//! ```
//! use fragseek_common::time::parse_program_date_time;
//!
//! let ms = parse_program_date_time("1970-01-01T00:00:01.500Z");
//! assert_eq!(ms, Some(1500.0));
//! assert_eq!(parse_program_date_time("not a date"), None);
//! ```

pub mod error;
pub mod time;

pub use error::{Error, Result};
