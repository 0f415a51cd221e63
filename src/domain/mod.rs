//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, auth)
//! - `checkin` - Check-in records and the outcome of recording one
//! - `emotion` - Emotion catalog entries and the chart palette
//! - `gamification` - Streak/XP/badge procedure results and retry policy
//! - `analytics` - Emotion tallies and the aggregate views built from them
//! - `organization` - Profiles, organization membership, and candidate search

pub mod analytics;
pub mod checkin;
pub mod emotion;
pub mod foundation;
pub mod gamification;
pub mod organization;
