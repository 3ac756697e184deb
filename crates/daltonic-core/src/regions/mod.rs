//! Regions of interest — detector boxes, clamping, and the detection cache.

pub mod policy;
pub mod region;

pub use policy::{DetectionCache, RegionSelectionPolicy};
pub use region::Region;
