pub mod common;

pub mod a001_equipment;
pub mod a002_equipment_category;
pub mod a003_location;
pub mod a004_part;
pub mod a005_work_order;
pub mod a006_maintenance_schedule;
pub mod a007_team;
pub mod a008_organization;
