//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Data Ports
//!
//! - `CheckInRepository` - Check-in writes and per-user reads
//! - `EmotionReader` - Emotion catalog
//! - `ProfileReader` - Profile directory
//! - `OrganizationMemberReader` / `OrganizationMemberWriter` - Membership rows
//! - `GamificationProcedures` - Streak, XP, and badge procedures
//! - `EmotionStatsReader` - Global emotion tally
//!
//! ## Access Scoping
//!
//! - `DataGateway` - Session-scoped stores (row-level policy applies)
//! - `PrivilegedGateway` - Service-identity writer for membership
//!
//! ## Infrastructure Ports
//!
//! - `ViewCache` - Cached page renderings
//! - `SessionValidator` - Access token validation

mod check_in_repository;
mod data_gateway;
mod emotion_reader;
mod emotion_stats_reader;
mod gamification;
mod organization_members;
mod profile_reader;
mod session_validator;
mod view_cache;

pub use check_in_repository::CheckInRepository;
pub use data_gateway::{DataGateway, PrivilegedGateway, SessionStores};
pub use emotion_reader::EmotionReader;
pub use emotion_stats_reader::EmotionStatsReader;
pub use gamification::GamificationProcedures;
pub use organization_members::{OrganizationMemberReader, OrganizationMemberWriter};
pub use profile_reader::ProfileReader;
pub use session_validator::SessionValidator;
pub use view_cache::{CacheError, ViewCache, ViewPath};
