mod dashboard;
mod report_issue;
mod sections;

pub use dashboard::Dashboard;
