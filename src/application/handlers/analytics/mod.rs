//! Analytics query handlers.
//!
//! - Personal analytics (cached per user)
//! - Profile overview (cached per user)
//! - Global Wrap (live)

mod get_global_wrap;
mod get_personal_analytics;
mod get_profile_overview;

pub use get_global_wrap::{GetGlobalWrapHandler, GetGlobalWrapQuery};
pub use get_personal_analytics::{GetPersonalAnalyticsHandler, GetPersonalAnalyticsQuery};
pub use get_profile_overview::{GetProfileOverviewHandler, GetProfileOverviewQuery};
