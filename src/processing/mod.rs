//! Intensity transforms for grayscale images
//!
//! Provides the fixed transform pipeline and its individual point and
//! equalization steps.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, Variant};
