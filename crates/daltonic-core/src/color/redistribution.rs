//! Error redistribution for Daltonization.
//!
//! The simulation error (`original - simulated`) is non-zero only in the cone
//! channel the viewer has lost. The shift matrices route that error into the
//! two channels they can still perceive, weighted by the redistribution
//! strength.

use glam::DVec3;

use crate::color::deficiency::DeficiencyType;
use crate::color::matrix::ColorMatrix;
use crate::error::{DaltonError, Result};
use crate::image::LmsImage;

/// Cross-channel injection weight of the reference shift matrices.
pub const DEFAULT_STRENGTH: f64 = 0.7;

/// Build the error-shift matrix for `deficiency` with cross-channel weight `strength`.
pub const fn shift_matrix(deficiency: DeficiencyType, strength: f64) -> Option<ColorMatrix> {
    let s = strength;
    match deficiency {
        DeficiencyType::None => None,
        // L error goes to M and S.
        DeficiencyType::Protanopia => Some(ColorMatrix([
            [0.0, 0.0, 0.0],
            [s, 1.0, 0.0],
            [s, 0.0, 1.0],
        ])),
        // M error goes to L and S.
        DeficiencyType::Deuteranopia => Some(ColorMatrix([
            [1.0, s, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, s, 1.0],
        ])),
        // S error goes to L and M.
        DeficiencyType::Tritanopia => Some(ColorMatrix([
            [1.0, 0.0, s],
            [0.0, 1.0, s],
            [0.0, 0.0, 0.0],
        ])),
    }
}

/// Maps simulation error onto a correction term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRedistributor {
    strength: f64,
}

impl ErrorRedistributor {
    /// Create a redistributor with a custom cross-channel weight.
    pub fn new(strength: f64) -> Result<Self> {
        if !strength.is_finite() || strength < 0.0 {
            return Err(DaltonError::InvalidConfig(format!(
                "redistribution strength must be a finite non-negative number, got {strength}"
            )));
        }
        Ok(Self { strength })
    }

    /// Cross-channel injection weight.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Shift matrix in use for `deficiency`.
    pub fn matrix(&self, deficiency: DeficiencyType) -> Option<ColorMatrix> {
        shift_matrix(deficiency, self.strength)
    }

    /// Correction term for a single pixel's error.
    pub fn redistribute_pixel(&self, error: DVec3, deficiency: DeficiencyType) -> DVec3 {
        match self.matrix(deficiency) {
            Some(m) => m.apply(error),
            None => DVec3::ZERO,
        }
    }

    /// Correction term for a whole error image. Typical vision gets a zero
    /// correction.
    pub fn redistribute(&self, error: &LmsImage, deficiency: DeficiencyType) -> LmsImage {
        match self.matrix(deficiency) {
            Some(m) => error.map(|e| m.apply(e)),
            None => error.map(|_| DVec3::ZERO),
        }
    }
}

impl Default for ErrorRedistributor {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
        }
    }
}
