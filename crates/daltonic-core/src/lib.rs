//! Daltonic Core — color-deficiency correction for live video.
//!
//! This crate contains the LMS color science, the per-deficiency simulation
//! and error-redistribution matrices, the Daltonization engine, and the
//! per-frame policy that decides where correction is applied. Camera capture,
//! object detection, and display are left to the caller.

pub mod color;
pub mod config;
pub mod correction;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod regions;

// Re-exports for convenience.
pub use color::deficiency::DeficiencyType;
pub use config::CorrectionConfig;
pub use correction::engine::DaltonizationEngine;
pub use correction::mode::{CorrectionMode, CorrectionModeController};
pub use error::{DaltonError, Result};
pub use crate::image::{ChannelOrder, Frame, LmsImage};
pub use pipeline::{FrameCorrectionPipeline, FrameOutcome};
pub use regions::policy::{DetectionCache, RegionSelectionPolicy};
pub use regions::region::Region;
