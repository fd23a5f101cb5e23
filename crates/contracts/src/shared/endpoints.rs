//! Пути REST API относительно `api.base_url`.
//!
//! Параметры пути записываются как `:name` и подставляются через [`fill`].

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const REFRESH: &str = "/auth/refresh";
    pub const ME: &str = "/auth/me";
}

pub mod users {
    pub const LIST: &str = "/users";
    pub const ITEM: &str = "/users/:id";
    pub const CHANGE_ROLE: &str = "/users/:id/role";
}

pub mod equipment {
    pub const LIST: &str = "/equipment";
    pub const ITEM: &str = "/equipment/:id";
    pub const REPORT_ISSUE: &str = "/equipment/:id/report-issue";
}

pub mod categories {
    pub const LIST: &str = "/categories";
    pub const ITEM: &str = "/categories/:id";
}

pub mod locations {
    pub const LIST: &str = "/locations";
    pub const ITEM: &str = "/locations/:id";
}

pub mod schedules {
    pub const LIST: &str = "/schedules";
    pub const ITEM: &str = "/schedules/:id";
    pub const GENERATE_WORK_ORDER: &str = "/schedules/:id/generate-workorder";
    pub const UPCOMING: &str = "/schedules/upcoming";
    pub const OVERDUE: &str = "/schedules/overdue";
}

pub mod workorders {
    pub const LIST: &str = "/workorders";
    pub const ITEM: &str = "/workorders/:id";
    pub const STATUS: &str = "/workorders/:id/status";
    pub const COMMENTS: &str = "/workorders/:id/comments";
    pub const TASK: &str = "/workorders/:id/tasks/:taskId";
}

pub mod parts {
    pub const LIST: &str = "/parts";
    pub const ITEM: &str = "/parts/:id";
    pub const ADJUST_STOCK: &str = "/parts/:id/adjust-stock";
    pub const LOW_STOCK: &str = "/parts/low-stock";
}

pub mod teams {
    pub const LIST: &str = "/teams";
    pub const ITEM: &str = "/teams/:id";
    pub const MEMBERS: &str = "/teams/:id/members";
    pub const MEMBER: &str = "/teams/:id/members/:userId";
    pub const WORK_ORDERS: &str = "/teams/:id/workorders";
}

pub mod organizations {
    pub const LIST: &str = "/organizations";
    pub const ITEM: &str = "/organizations/:id";
    pub const STATS: &str = "/organizations/:id/stats";
}

pub mod audit {
    pub const LIST: &str = "/audit-logs";
    pub const RESOURCE_HISTORY: &str = "/audit-logs/:resource/:id";
}

/// Подставить значения вместо сегментов `:name`.
///
/// Сегменты без значения остаются как есть.
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|name| params.iter().find(|(k, _)| *k == name))
                .map(|(_, v)| *v)
                .unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Частый случай: единственный параметр `:id`
pub fn with_id(template: &str, id: &str) -> String {
    fill(template, &[("id", id)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_whole_segments() {
        assert_eq!(with_id(equipment::ITEM, "42"), "/equipment/42");
        assert_eq!(
            fill(workorders::TASK, &[("id", "WO-1001"), ("taskId", "t2")]),
            "/workorders/WO-1001/tasks/t2"
        );
        assert_eq!(
            with_id(schedules::GENERATE_WORK_ORDER, "3"),
            "/schedules/3/generate-workorder"
        );
    }

    #[test]
    fn test_fill_team_and_audit_paths() {
        assert_eq!(
            fill(teams::MEMBER, &[("id", "2"), ("userId", "5")]),
            "/teams/2/members/5"
        );
        assert_eq!(with_id(organizations::STATS, "1"), "/organizations/1/stats");
        assert_eq!(
            fill(audit::RESOURCE_HISTORY, &[("resource", "team"), ("id", "3")]),
            "/audit-logs/team/3"
        );
    }

    #[test]
    fn test_fill_keeps_unknown_placeholders() {
        assert_eq!(fill(workorders::TASK, &[("id", "1")]), "/workorders/1/tasks/:taskId");
        assert_eq!(fill(parts::LOW_STOCK, &[("id", "1")]), "/parts/low-stock");
    }
}
