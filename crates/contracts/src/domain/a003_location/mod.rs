pub mod aggregate;

pub use aggregate::{Location, LocationDto, LocationId, LocationPatch, LocationStatus, LocationType};
