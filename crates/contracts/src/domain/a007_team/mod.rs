pub mod aggregate;

pub use aggregate::{AddMemberRequest, Team, TeamDto, TeamId, TeamMember, TeamMemberRole};
