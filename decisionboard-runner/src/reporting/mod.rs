//! Reporting and artifact export pipeline.

pub mod artifacts;
pub mod export;
pub mod reports;

pub use artifacts::{ArtifactManager, ArtifactPaths};
pub use export::export_build_with_report;
