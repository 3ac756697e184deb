//! RGB ↔ LMS conversion.
//!
//! Uses the cone-response matrix from the LMS Daltonization reference
//! (Fidaner, Lin & Ozguven). RGB components are normalized to [0, 1] before
//! the forward transform; the inverse transform clamps to [0, 1] and
//! denormalizes to 8-bit, rounding to nearest.
//!
//! Out-of-gamut LMS values are never an error. Clamping on the way back to RGB
//! is the only correction, so anything outside the RGB cube is lost.

use glam::DVec3;

use crate::color::matrix::ColorMatrix;
use crate::image::{ChannelOrder, Frame, LmsImage};

/// Linear RGB to LMS cone response.
pub const RGB_TO_LMS: ColorMatrix = ColorMatrix([
    [17.8824, 43.5161, 4.11935],
    [3.45565, 27.1554, 3.86714],
    [0.0299566, 0.184309, 1.46709],
]);

/// Stateless RGB ↔ LMS transform.
///
/// The inverse matrix is computed once, at construction, from the exact
/// forward matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSpaceTransform {
    rgb_to_lms: ColorMatrix,
    lms_to_rgb: ColorMatrix,
}

impl ColorSpaceTransform {
    /// Transform built on the reference cone-response matrix.
    pub fn new() -> Self {
        Self {
            rgb_to_lms: RGB_TO_LMS,
            lms_to_rgb: RGB_TO_LMS.inverse(),
        }
    }

    /// Forward matrix (RGB → LMS).
    pub fn rgb_to_lms(&self) -> &ColorMatrix {
        &self.rgb_to_lms
    }

    /// Inverse matrix (LMS → RGB).
    pub fn lms_to_rgb(&self) -> &ColorMatrix {
        &self.lms_to_rgb
    }

    /// Convert one 8-bit RGB pixel to LMS.
    pub fn pixel_to_lms(&self, rgb: [u8; 3]) -> DVec3 {
        self.rgb_to_lms.apply(normalize(rgb))
    }

    /// Convert one LMS triple to an 8-bit RGB pixel.
    pub fn pixel_to_rgb(&self, lms: DVec3) -> [u8; 3] {
        denormalize(self.lms_to_rgb.apply(lms))
    }

    /// Convert a frame to LMS. Channel order is resolved here, so the LMS
    /// image is independent of how the source stored its pixels.
    pub fn to_lms(&self, frame: &Frame) -> LmsImage {
        let order = frame.channel_order;
        LmsImage {
            width: frame.width,
            height: frame.height,
            pixels: frame
                .pixels
                .iter()
                .map(|&px| self.pixel_to_lms(order.to_rgb(px)))
                .collect(),
        }
    }

    /// Convert an LMS image back to an 8-bit frame in `order`.
    pub fn to_rgb(&self, lms: &LmsImage, order: ChannelOrder) -> Frame {
        Frame {
            width: lms.width,
            height: lms.height,
            pixels: lms
                .pixels
                .iter()
                .map(|&v| order.from_rgb(self.pixel_to_rgb(v)))
                .collect(),
            channel_order: order,
        }
    }
}

impl Default for ColorSpaceTransform {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(rgb: [u8; 3]) -> DVec3 {
    DVec3::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64) / 255.0
}

/// Clamp to [0, 1], scale to [0, 255] and round to nearest.
fn denormalize(rgb: DVec3) -> [u8; 3] {
    let v = (rgb.clamp(DVec3::ZERO, DVec3::ONE) * 255.0).round();
    [v.x as u8, v.y as u8, v.z as u8]
}
