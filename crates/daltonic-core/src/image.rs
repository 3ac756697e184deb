//! Frame representation for the correction pipeline.
//!
//! Frames are 8-bit three-channel images in a known channel order. The LMS
//! intermediate is stored as `f64` triples so that every deficiency type runs
//! through the same numeric path.

use std::ops::{Add, Sub};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{DaltonError, Result};
use crate::regions::region::Region;

/// Number of color channels every frame carries.
pub const CHANNELS: usize = 3;

/// Order of the three color components inside each pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Blue, green, red (typical of camera capture APIs).
    Bgr,
}

impl ChannelOrder {
    /// Reorder a pixel stored in this order into RGB.
    pub const fn to_rgb(self, px: [u8; 3]) -> [u8; 3] {
        match self {
            Self::Rgb => px,
            Self::Bgr => [px[2], px[1], px[0]],
        }
    }

    /// Reorder an RGB pixel into this order.
    pub const fn from_rgb(self, rgb: [u8; 3]) -> [u8; 3] {
        // Swapping R and B is its own inverse.
        self.to_rgb(rgb)
    }
}

/// An 8-bit, three-channel image as handed over by the frame source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Row-major pixel data, `width * height` entries.
    pub pixels: Vec<[u8; 3]>,
    /// Channel order of every entry in `pixels`.
    pub channel_order: ChannelOrder,
}

impl Frame {
    /// Build a frame from row-major pixels, rejecting malformed dimensions.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<[u8; 3]>,
        channel_order: ChannelOrder,
    ) -> Result<Self> {
        let frame = Self {
            width,
            height,
            pixels,
            channel_order,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Build a frame where every pixel has the same value.
    pub fn filled(
        width: u32,
        height: u32,
        pixel: [u8; 3],
        channel_order: ChannelOrder,
    ) -> Result<Self> {
        let len = (width as usize) * (height as usize);
        Self::new(width, height, vec![pixel; len], channel_order)
    }

    /// Build a frame from an interleaved byte buffer.
    ///
    /// `channels` is the channel count the frame source reports; anything
    /// other than 3 is rejected, as is a buffer whose length does not match
    /// `width * height * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: usize,
        data: &[u8],
        channel_order: ChannelOrder,
    ) -> Result<Self> {
        if channels != CHANNELS {
            return Err(DaltonError::InvalidFrame(format!(
                "expected {CHANNELS} channels, got {channels}"
            )));
        }
        let expected = (width as usize) * (height as usize) * CHANNELS;
        if data.len() != expected {
            return Err(DaltonError::InvalidFrame(format!(
                "buffer holds {} bytes, {width}x{height}x{CHANNELS} needs {expected}",
                data.len()
            )));
        }
        let pixels = data
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(width, height, pixels, channel_order)
    }

    /// Convert an RGB image from the `image` crate.
    pub fn from_rgb_image(img: &::image::RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self::new(width, height, pixels, ChannelOrder::Rgb)
    }

    /// Convert to an RGB image, reordering channels if needed.
    pub fn to_rgb_image(&self) -> ::image::RgbImage {
        ::image::RgbImage::from_fn(self.width, self.height, |x, y| {
            ::image::Rgb(self.channel_order.to_rgb(self.pixel(x, y)))
        })
    }

    /// Flatten into an interleaved byte buffer in this frame's channel order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Check the frame invariants: non-zero size and a matching pixel count.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DaltonError::InvalidFrame(format!(
                "zero-sized frame {}x{}",
                self.width, self.height
            )));
        }
        let expected = (self.width as usize) * (self.height as usize);
        if self.pixels.len() != expected {
            return Err(DaltonError::InvalidFrame(format!(
                "{} pixels for a {}x{} frame (expected {expected})",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Pixel at `(x, y)` in this frame's channel order.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Copy the pixels covered by `region` into a new frame.
    ///
    /// Fails with `InvalidFrame` unless `region` is non-empty and lies inside
    /// this frame.
    pub fn crop(&self, region: &Region) -> Result<Frame> {
        let (x1, y1, x2, y2) = self.checked_bounds(region)?;
        let mut pixels = Vec::with_capacity(((x2 - x1) * (y2 - y1)) as usize);
        for y in y1..y2 {
            let start = self.index(x1, y);
            let end = self.index(x2 - 1, y) + 1;
            pixels.extend_from_slice(&self.pixels[start..end]);
        }
        Ok(Frame {
            width: x2 - x1,
            height: y2 - y1,
            pixels,
            channel_order: self.channel_order,
        })
    }

    /// Write `patch` back over the pixels covered by `region`.
    ///
    /// `patch` must have the region's dimensions, as produced by
    /// [`Frame::crop`]; otherwise nothing is written and `InvalidFrame` is
    /// returned.
    pub fn paste(&mut self, region: &Region, patch: &Frame) -> Result<()> {
        let (x1, y1, x2, y2) = self.checked_bounds(region)?;
        if (patch.width, patch.height) != (x2 - x1, y2 - y1) {
            return Err(DaltonError::InvalidFrame(format!(
                "{}x{} patch does not fit a {}x{} region",
                patch.width,
                patch.height,
                x2 - x1,
                y2 - y1
            )));
        }
        patch.validate()?;
        let row_len = (x2 - x1) as usize;
        for (row, y) in (y1..y2).enumerate() {
            let start = self.index(x1, y);
            let src = row * row_len;
            self.pixels[start..start + row_len].copy_from_slice(&patch.pixels[src..src + row_len]);
        }
        Ok(())
    }

    /// Corners of `region` if it is non-empty and inside this frame.
    fn checked_bounds(&self, region: &Region) -> Result<(u32, u32, u32, u32)> {
        match region.clamped(self.width, self.height) {
            Some(c) if (c.x1, c.y1, c.x2, c.y2) == (region.x1, region.y1, region.x2, region.y2) => {
                Ok(c.bounds_u32())
            }
            _ => Err(DaltonError::InvalidFrame(format!(
                "region ({}, {}, {}, {}) is empty or outside the {}x{} frame",
                region.x1, region.y1, region.x2, region.y2, self.width, self.height
            ))),
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }
}

/// Image in LMS cone-response space. Values are unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct LmsImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Row-major `(L, M, S)` triples.
    pub pixels: Vec<DVec3>,
}

impl LmsImage {
    /// Apply `f` to every pixel, keeping the dimensions.
    pub fn map(&self, f: impl Fn(DVec3) -> DVec3) -> LmsImage {
        LmsImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Combine two images of equal size pixel by pixel.
    fn zip_with(&self, other: &LmsImage, f: impl Fn(DVec3, DVec3) -> DVec3) -> LmsImage {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        LmsImage {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .zip(&other.pixels)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl Sub for &LmsImage {
    type Output = LmsImage;

    fn sub(self, rhs: Self) -> LmsImage {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Add for &LmsImage {
    type Output = LmsImage;

    fn add(self, rhs: Self) -> LmsImage {
        self.zip_with(rhs, |a, b| a + b)
    }
}
