//! # gcodesim Core
//!
//! Core types, units, and error definitions shared by the gcodesim crates.
//! Provides the coordinate and axis models used by the virtualizer and the
//! unified error type returned by its fallible surfaces.

pub mod data;
pub mod error;
pub mod units;

pub use data::{Axis, CNCPoint};
pub use error::{ConfigError, Error, GcodeError, Result};
pub use units::{Units, MM_PER_INCH};
