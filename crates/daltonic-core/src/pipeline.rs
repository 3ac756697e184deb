//! Per-frame correction entry point.
//!
//! Reads the active mode once, asks the region policy where to correct, and
//! runs the engine over each region in order. Later regions overwrite earlier
//! ones where they overlap.

use crate::config::CorrectionConfig;
use crate::correction::engine::DaltonizationEngine;
use crate::correction::mode::{CorrectionMode, CorrectionModeController};
use crate::error::Result;
use crate::image::Frame;
use crate::regions::policy::RegionSelectionPolicy;
use crate::regions::region::Region;

/// Result of processing one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// The corrected frame, same size and channel order as the input.
    pub frame: Frame,
    /// Mode the frame was processed with.
    pub mode: CorrectionMode,
    /// Regions that were corrected, in application order. Empty when the
    /// mode is off. Handed to the overlay for drawing.
    pub regions: Vec<Region>,
}

/// Frame-synchronous correction pipeline. Owns all per-session state.
#[derive(Debug, Clone)]
pub struct FrameCorrectionPipeline {
    engine: DaltonizationEngine,
    modes: CorrectionModeController,
    policy: RegionSelectionPolicy,
}

impl FrameCorrectionPipeline {
    /// Wire an engine, a mode controller and a region policy together.
    pub fn new(
        engine: DaltonizationEngine,
        modes: CorrectionModeController,
        policy: RegionSelectionPolicy,
    ) -> Self {
        Self {
            engine,
            modes,
            policy,
        }
    }

    /// Build a pipeline from validated configuration.
    pub fn from_config(config: &CorrectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            DaltonizationEngine::with_strength(config.redistribution_strength)?,
            CorrectionModeController::with_mode(config.initial_mode),
            RegionSelectionPolicy::new(config.skip_frames)?,
        ))
    }

    pub fn engine(&self) -> &DaltonizationEngine {
        &self.engine
    }

    pub fn modes(&self) -> &CorrectionModeController {
        &self.modes
    }

    /// Mutable access for the control surface.
    pub fn modes_mut(&mut self) -> &mut CorrectionModeController {
        &mut self.modes
    }

    pub fn policy(&self) -> &RegionSelectionPolicy {
        &self.policy
    }

    /// Whether the detector should run before processing `frame_index`.
    pub fn needs_detection(&self, frame_index: u64) -> bool {
        self.policy.needs_refresh(frame_index)
    }

    /// Correct one frame.
    ///
    /// `raw_detections` of `None` means whole-frame mode: the region policy is
    /// bypassed and the entire frame is corrected. `Some` goes through the
    /// policy's cadence, even when the list is empty.
    ///
    /// A malformed frame fails with `InvalidFrame` before anything runs.
    pub fn process_frame(
        &mut self,
        mut frame: Frame,
        frame_index: u64,
        raw_detections: Option<&[Region]>,
    ) -> Result<FrameOutcome> {
        frame.validate()?;
        let mode = self.modes.active();

        // The cache follows the cadence whether or not correction is on.
        // Cached regions were clamped to the frame they came from, so they
        // are clamped again to this one.
        let (width, height) = (frame.width, frame.height);
        let regions = raw_detections.map(|raw| {
            self.policy
                .select_regions(frame_index, raw, width, height)
                .iter()
                .filter_map(|r| r.clamped(width, height))
                .collect::<Vec<_>>()
        });

        if mode.is_off() {
            return Ok(FrameOutcome {
                frame,
                mode,
                regions: Vec::new(),
            });
        }

        let deficiency = mode.deficiency();
        let Some(regions) = regions else {
            let corrected = self.engine.correct(&frame, deficiency)?;
            return Ok(FrameOutcome {
                frame: corrected,
                mode,
                regions: vec![Region::full_frame(frame.width, frame.height)],
            });
        };

        for region in &regions {
            let patch = frame.crop(region)?;
            let corrected = self.engine.correct(&patch, deficiency)?;
            frame.paste(region, &corrected)?;
        }

        Ok(FrameOutcome {
            frame,
            mode,
            regions,
        })
    }
}

impl Default for FrameCorrectionPipeline {
    fn default() -> Self {
        Self::new(
            DaltonizationEngine::default(),
            CorrectionModeController::default(),
            RegionSelectionPolicy::default(),
        )
    }
}
