//! File helpers

pub mod file_io;

pub use file_io::{FileReadStats, GcodeFileReader};
