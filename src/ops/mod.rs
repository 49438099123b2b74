//! Shape-generating operations.
//!
//! Each operation consumes its inputs and returns a freshly owned, validated
//! `BRepBody`.

pub mod sweep;

pub use sweep::{LinearSweepBuilder, LinearSweepFeature};
