pub mod details;
pub mod list;

use contracts::domain::a006_maintenance_schedule::MaintenanceSchedule;

/// Срок графика для колонки "Next due": overdue / upcoming / обычный
pub fn due_state(schedule: &MaintenanceSchedule, now: chrono::DateTime<chrono::Utc>) -> DueState {
    use contracts::domain::a006_maintenance_schedule::DEFAULT_UPCOMING_DAYS;
    if !schedule.is_active {
        DueState::Inactive
    } else if schedule.next_due <= now {
        DueState::Overdue
    } else if schedule.next_due <= now + chrono::Duration::days(DEFAULT_UPCOMING_DAYS) {
        DueState::Upcoming
    } else {
        DueState::Scheduled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    Inactive,
    Overdue,
    Upcoming,
    Scheduled,
}

impl DueState {
    pub fn label(&self) -> &'static str {
        match self {
            DueState::Inactive => "Inactive",
            DueState::Overdue => "Overdue",
            DueState::Upcoming => "Upcoming",
            DueState::Scheduled => "Scheduled",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            DueState::Inactive => "neutral",
            DueState::Overdue => "error",
            DueState::Upcoming => "warning",
            DueState::Scheduled => "success",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use contracts::domain::a006_maintenance_schedule::{MaintenanceScheduleId, ScheduleDto};

    #[test]
    fn test_due_state_matches_windows() {
        let now = Utc::now();
        let dto = ScheduleDto {
            equipment_id: "1".into(),
            ..Default::default()
        };
        let mut s = MaintenanceSchedule::from_dto(MaintenanceScheduleId::new("1"), &dto, None, now);
        assert_eq!(due_state(&s, now), DueState::Scheduled);

        s.next_due = now + Duration::days(7);
        assert_eq!(due_state(&s, now), DueState::Upcoming);

        s.next_due = now;
        assert_eq!(due_state(&s, now), DueState::Overdue);

        s.is_active = false;
        assert_eq!(due_state(&s, now), DueState::Inactive);
    }
}
