//! Fragseek - fragment locator for adaptive streaming
//!
//! This library crate exposes the caller-side pieces of the `fragseek` binary
//! (configuration, level loading and the next-fragment policy) for
//! integration testing.

pub mod config;
pub mod level;
pub mod planner;
