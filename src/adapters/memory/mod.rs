//! In-memory gateway backend for development and tests.

mod gateway;
mod store;

pub use gateway::MemoryGateway;
pub use store::InMemoryStore;
