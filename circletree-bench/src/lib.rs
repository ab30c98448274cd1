//! Circletree Benchmark Library
//!
//! Provides geometry generators for benchmarking bounding-circle tree
//! construction and queries.

pub mod data_gen;
