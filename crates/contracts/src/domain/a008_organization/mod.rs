pub mod aggregate;

pub use aggregate::{
    slugify, Organization, OrganizationDto, OrganizationId, OrganizationStats, SubscriptionTier,
    INDUSTRIES,
};
