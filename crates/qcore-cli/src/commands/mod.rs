//! CLI command implementations.

pub mod algorithm;
pub mod common;
pub mod exercises;
pub mod gates;
pub mod grade;
pub mod preview;
pub mod simulate;
pub mod version;
