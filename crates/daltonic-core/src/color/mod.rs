//! Color science — LMS transforms, deficiency simulation, and error redistribution.

pub mod deficiency;
pub mod lms;
pub mod matrix;
pub mod redistribution;

pub use deficiency::{DeficiencySimulator, DeficiencyType};
pub use lms::ColorSpaceTransform;
pub use matrix::ColorMatrix;
pub use redistribution::ErrorRedistributor;
