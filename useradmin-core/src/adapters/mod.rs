//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the UsersApi port
//! - Local demo store for the UsersApi port (demo mode and tests)

pub mod demo;
pub mod http;

#[cfg(test)]
pub mod mock_server;
