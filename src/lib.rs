#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Node, decibel and frequency constants used throughout the library.
pub mod constants;
/// SI magnitude prefixes and unit-string interpretation.
pub mod units;
/// Shared numerical utilities (complex scalars, checked division, 2×2 matrices).
pub mod math;
/// Ladder components, cascading, termination and projection.
pub mod circuits;
/// Frequency sweep builders and decibel/phase helpers.
pub mod sweep;
/// High-level sweep configuration and engine.
pub mod simulation;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
