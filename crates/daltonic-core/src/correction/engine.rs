//! Daltonization engine.
//!
//! Composes the LMS transform, the dichromat simulator and the error
//! redistributor into one frame-to-frame correction.

use crate::color::deficiency::{DeficiencySimulator, DeficiencyType};
use crate::color::lms::ColorSpaceTransform;
use crate::color::redistribution::ErrorRedistributor;
use crate::error::Result;
use crate::image::Frame;

/// Stateless Daltonization. All matrices are fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DaltonizationEngine {
    transform: ColorSpaceTransform,
    simulator: DeficiencySimulator,
    redistributor: ErrorRedistributor,
}

impl DaltonizationEngine {
    /// Engine with the reference redistribution strength.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom cross-channel redistribution strength.
    pub fn with_strength(strength: f64) -> Result<Self> {
        Ok(Self {
            redistributor: ErrorRedistributor::new(strength)?,
            ..Self::default()
        })
    }

    /// RGB ↔ LMS transform used by this engine.
    pub fn transform(&self) -> &ColorSpaceTransform {
        &self.transform
    }

    /// Error redistributor, including its strength.
    pub fn redistributor(&self) -> &ErrorRedistributor {
        &self.redistributor
    }

    /// Correct `frame` for a viewer with `deficiency`.
    ///
    /// `DeficiencyType::None` returns the frame unchanged without entering
    /// LMS space, so no rounding or clamping is applied.
    ///
    /// # Algorithm
    /// 1. RGB → LMS
    /// 2. Simulate the dichromat's LMS response
    /// 3. Error = original − simulated
    /// 4. Redistribute the error into perceivable channels
    /// 5. Corrected = original + redistributed error
    /// 6. LMS → RGB (clamp, round)
    pub fn correct(&self, frame: &Frame, deficiency: DeficiencyType) -> Result<Frame> {
        frame.validate()?;
        if deficiency == DeficiencyType::None {
            return Ok(frame.clone());
        }

        let lms_original = self.transform.to_lms(frame);
        let lms_simulated = self.simulator.simulate(&lms_original, deficiency);
        let error = &lms_original - &lms_simulated;
        let correction = self.redistributor.redistribute(&error, deficiency);
        let lms_corrected = &lms_original + &correction;

        Ok(self.transform.to_rgb(&lms_corrected, frame.channel_order))
    }

    /// Render what a viewer with `deficiency` perceives.
    ///
    /// Uses the same LMS path and rounding as [`DaltonizationEngine::correct`].
    pub fn simulate(&self, frame: &Frame, deficiency: DeficiencyType) -> Result<Frame> {
        frame.validate()?;
        if deficiency == DeficiencyType::None {
            return Ok(frame.clone());
        }

        let lms = self.transform.to_lms(frame);
        let simulated = self.simulator.simulate(&lms, deficiency);
        Ok(self.transform.to_rgb(&simulated, frame.channel_order))
    }
}
