//! BedFusion: BED file normalization
//!
//! This library sorts, merges, pads, splits and deduplicates BED lines with
//! deterministic, policy-driven behavior.
//!
//! # Example
//!
//! ```rust,no_run
//! use bedfusion::bed::{BedFile, ColumnSpec};
//! use bedfusion::config::Options;
//! use bedfusion::pipeline;
//!
//! let config = Options::default().validate().unwrap();
//! let mut bed = BedFile::new();
//! bed.read_path("regions.bed", ColumnSpec::default()).unwrap();
//! let fused = pipeline::run(&config, bed.lines, None).unwrap();
//! ```

pub mod bed;
pub mod commands;
pub mod compare;
pub mod config;
pub mod genome;
pub mod interval;
pub mod pipeline;

// Re-export commonly used types
pub use bed::{BedError, BedFile, BedReader, ColumnSpec};
pub use compare::ChromOrder;
pub use config::{FusionConfig, Options};
pub use genome::Genome;
pub use interval::Line;
pub use pipeline::Fused;
