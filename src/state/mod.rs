//! State module for tracking analysis progress
//!
//! # Components
//!
//! - `AnalysisStage`: The stages of one analysis run and the legal steps between them

mod analysis_stage;

// Re-export main types
pub use analysis_stage::AnalysisStage;
