use chrono::{DateTime, Duration, Utc};

use super::aggregate::MaintenanceSchedule;

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Активные графики со сроком в окне `(now, now + days]`, ближайшие первыми
pub fn upcoming(
    schedules: &[MaintenanceSchedule],
    now: DateTime<Utc>,
    days: i64,
) -> Vec<&MaintenanceSchedule> {
    let horizon = now + Duration::days(days);
    let mut result: Vec<_> = schedules
        .iter()
        .filter(|s| s.is_active && s.next_due > now && s.next_due <= horizon)
        .collect();
    result.sort_by_key(|s| s.next_due);
    result
}

/// Активные графики с наступившим сроком, самые старые первыми
pub fn overdue(schedules: &[MaintenanceSchedule], now: DateTime<Utc>) -> Vec<&MaintenanceSchedule> {
    let mut result: Vec<_> = schedules
        .iter()
        .filter(|s| s.is_active && s.next_due <= now)
        .collect();
    result.sort_by_key(|s| s.next_due);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a006_maintenance_schedule::{MaintenanceScheduleId, ScheduleDto};

    fn at(id: &str, now: DateTime<Utc>, offset_days: i64, active: bool) -> MaintenanceSchedule {
        let dto = ScheduleDto {
            equipment_id: "1".into(),
            ..Default::default()
        };
        let mut s = MaintenanceSchedule::from_dto(MaintenanceScheduleId::new(id), &dto, None, now);
        s.next_due = now + Duration::days(offset_days);
        s.is_active = active;
        s
    }

    fn ids(list: Vec<&MaintenanceSchedule>) -> Vec<&str> {
        list.into_iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_upcoming_window_bounds() {
        let now = Utc::now();
        let list = vec![
            at("edge", now, 7, true),
            at("soon", now, 2, true),
            at("late", now, 8, true),
            at("now", now, 0, true),
            at("off", now, 1, false),
        ];
        assert_eq!(ids(upcoming(&list, now, DEFAULT_UPCOMING_DAYS)), ["soon", "edge"]);
        assert_eq!(ids(upcoming(&list, now, 30)), ["soon", "edge", "late"]);
    }

    #[test]
    fn test_overdue_includes_due_now() {
        let now = Utc::now();
        let list = vec![
            at("past", now, -3, true),
            at("now", now, 0, true),
            at("future", now, 1, true),
            at("inactive", now, -10, false),
        ];
        assert_eq!(ids(overdue(&list, now)), ["past", "now"]);
    }
}
