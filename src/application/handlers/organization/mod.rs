//! Organization handlers.
//!
//! ## Commands
//! - Adding a batch of users to an organization
//!
//! ## Queries
//! - Searching profiles that could be added

mod add_members;
mod search_candidates;

// Commands
pub use add_members::{AddMembersCommand, AddMembersHandler};

// Queries
pub use search_candidates::{
    SearchCandidatesHandler, SearchCandidatesQuery, SearchCandidatesResult,
};
