//! Side-by-side text diffing.
//!
//! The pipeline has three layers: [`engine`] computes a minimal edit script
//! between two sequences (Myers' algorithm), [`rows`] turns that script
//! into aligned presentation-ready diff rows with optional inline
//! highlighting, and [`render`] lays the rows out for a terminal.

pub mod engine;
pub mod render;
pub mod rows;
