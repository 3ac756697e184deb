//! Region selection with a frame-skip cadence.
//!
//! Object detection is far more expensive than correction, so detections are
//! refreshed only every `skip_frames` frames and reused in between. Stale
//! boxes trade positional accuracy for throughput.

use crate::error::{DaltonError, Result};
use crate::regions::region::Region;

/// Default refresh period, in frames.
pub const DEFAULT_SKIP_FRAMES: u64 = 5;

/// Regions from the most recent refresh and the frame they came from.
///
/// Replaced wholesale on refresh, never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionCache {
    regions: Vec<Region>,
    frame_index: Option<u64>,
}

impl DetectionCache {
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Frame index of the last refresh, `None` before the first.
    pub fn frame_index(&self) -> Option<u64> {
        self.frame_index
    }

    fn replace(&mut self, regions: Vec<Region>, frame_index: u64) {
        *self = Self {
            regions,
            frame_index: Some(frame_index),
        };
    }
}

/// Chooses the regions to correct on each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSelectionPolicy {
    skip_frames: u64,
    cache: DetectionCache,
}

impl RegionSelectionPolicy {
    /// Policy refreshing every `skip_frames` frames. Zero is rejected.
    pub fn new(skip_frames: u64) -> Result<Self> {
        if skip_frames == 0 {
            return Err(DaltonError::InvalidConfig(
                "skip cadence must be at least 1 frame".to_string(),
            ));
        }
        Ok(Self {
            skip_frames,
            cache: DetectionCache::default(),
        })
    }

    pub fn skip_frames(&self) -> u64 {
        self.skip_frames
    }

    pub fn cache(&self) -> &DetectionCache {
        &self.cache
    }

    /// Whether `frame_index` starts a new cadence window. The frame loop uses
    /// this to decide whether to run the detector at all.
    pub fn needs_refresh(&self, frame_index: u64) -> bool {
        frame_index % self.skip_frames == 0
    }

    /// Regions to correct on frame `frame_index` of a `width × height` stream.
    ///
    /// On refresh frames the cache is replaced by `raw_detections`, clamped to
    /// the frame, with boxes that fall entirely outside dropped. Input order
    /// is kept. On every other frame `raw_detections` is ignored and the
    /// cached regions are returned unchanged.
    pub fn select_regions(
        &mut self,
        frame_index: u64,
        raw_detections: &[Region],
        width: u32,
        height: u32,
    ) -> &[Region] {
        if self.needs_refresh(frame_index) {
            let regions: Vec<Region> = raw_detections
                .iter()
                .filter_map(|r| r.clamped(width, height))
                .collect();
            let dropped = raw_detections.len() - regions.len();
            if dropped > 0 {
                tracing::trace!("Dropped {} detections outside the {}x{} frame", dropped, width, height);
            }
            tracing::debug!(
                "Detection cache refreshed at frame {} with {} regions",
                frame_index,
                regions.len()
            );
            self.cache.replace(regions, frame_index);
        }
        self.cache.regions()
    }
}

impl Default for RegionSelectionPolicy {
    fn default() -> Self {
        Self {
            skip_frames: DEFAULT_SKIP_FRAMES,
            cache: DetectionCache::default(),
        }
    }
}
