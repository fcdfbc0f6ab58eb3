//! AI domain - listing analysis and generated pitch materials
//!
//! Responsibilities:
//! - Background analysis pipeline (script or metadata -> model -> material + listing summary)
//! - One-pager and pitch-deck generation
//! - Reading back the latest material of each kind

pub mod actions;
pub mod data;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod prompts;

pub use data::{AnalysisResponse, OnePagerResponse, PitchDeckResponse};
pub use models::{IpMaterial, MaterialType, NewMaterial};
