pub mod aggregate;
pub mod window;

pub use aggregate::{
    FrequencyType, MaintenanceSchedule, MaintenanceScheduleId, ScheduleDto, SchedulePatch,
    ScheduleType, UNKNOWN_EQUIPMENT,
};
pub use window::{overdue, upcoming, DEFAULT_UPCOMING_DAYS};
