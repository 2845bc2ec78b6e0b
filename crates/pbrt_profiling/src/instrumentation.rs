//! Execution time measurement of named code regions.

pub mod profiler;
mod report;
