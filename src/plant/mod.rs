//! Static plant inputs and the sizing engine built on them.

/// Reference plant scaling template.
pub mod reference;
/// Site location and monthly climate profile.
pub mod site;
pub mod sizing;

pub use reference::ReferenceProject;
pub use site::SiteProfile;
pub use sizing::{PlantSizingResult, SizingEngine};
