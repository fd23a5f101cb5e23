pub mod aggregate;

pub use aggregate::{EquipmentCategory, EquipmentCategoryDto, EquipmentCategoryId};
