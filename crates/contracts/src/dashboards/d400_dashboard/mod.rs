pub mod summary;

pub use summary::{assigned_to, users_by_role, CountBy, DashboardSummary, RECENT_LIMIT};
