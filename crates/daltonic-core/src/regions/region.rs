//! Axis-aligned regions of interest.

use serde::{Deserialize, Serialize};

/// A rectangle `[x1, x2) × [y1, y2)` in frame coordinates.
///
/// Boxes from a detector may extend past the frame or even lie outside it;
/// [`Region::clamped`] brings them into bounds. Label, class and confidence
/// are carried for the overlay and never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    /// Detector class index, if any.
    #[serde(default)]
    pub class_id: Option<u32>,
    /// Detector class name, if any.
    #[serde(default)]
    pub label: Option<String>,
    /// Detector confidence in [0, 1], if any.
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl Region {
    /// Unlabelled region.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            class_id: None,
            label: None,
            confidence: None,
        }
    }

    /// The whole of a `width × height` frame.
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self::new(0, 0, saturate(width), saturate(height))
    }

    /// Attach detector metadata.
    pub fn with_detection(mut self, class_id: u32, label: impl Into<String>, confidence: f32) -> Self {
        self.class_id = Some(class_id);
        self.label = Some(label.into());
        self.confidence = Some(confidence);
        self
    }

    /// Signed width; negative for inverted rectangles.
    pub fn width(&self) -> i64 {
        i64::from(self.x2) - i64::from(self.x1)
    }

    /// Signed height; negative for inverted rectangles.
    pub fn height(&self) -> i64 {
        i64::from(self.y2) - i64::from(self.y1)
    }

    /// Area in pixels; zero for empty or inverted rectangles.
    pub fn area(&self) -> u64 {
        if self.width() <= 0 || self.height() <= 0 {
            return 0;
        }
        (self.width() * self.height()) as u64
    }

    /// Clamp to a `width × height` frame.
    ///
    /// Returns `None` when nothing of the region remains inside the frame.
    /// A returned region satisfies `0 <= x1 < x2 <= width` and
    /// `0 <= y1 < y2 <= height`.
    pub fn clamped(&self, width: u32, height: u32) -> Option<Region> {
        let (w, h) = (saturate(width), saturate(height));
        let x1 = self.x1.clamp(0, w);
        let y1 = self.y1.clamp(0, h);
        let x2 = self.x2.clamp(0, w);
        let y2 = self.y2.clamp(0, h);
        if x1 >= x2 || y1 >= y2 {
            return None;
        }
        Some(Region {
            x1,
            y1,
            x2,
            y2,
            ..self.clone()
        })
    }

    /// Corner coordinates as unsigned values. Only meaningful after clamping.
    pub(crate) fn bounds_u32(&self) -> (u32, u32, u32, u32) {
        (
            self.x1.max(0) as u32,
            self.y1.max(0) as u32,
            self.x2.max(0) as u32,
            self.y2.max(0) as u32,
        )
    }
}

fn saturate(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
