//! Moodwrap - emotion check-in backend.
//!
//! Users record how they feel; each check-in feeds a streak, XP and badge
//! pipeline and a set of per-user and global views. Organizations can add
//! members through a privileged path kept apart from ordinary data access.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
