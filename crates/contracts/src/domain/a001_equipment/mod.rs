pub mod aggregate;
pub mod filter;

pub use aggregate::{
    Equipment, EquipmentDto, EquipmentId, EquipmentPatch, EquipmentStatus, HealthLevel,
};
pub use filter::EquipmentFilter;
