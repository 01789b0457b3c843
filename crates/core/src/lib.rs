// Stage Tracker Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal layout: adapters live in sibling crates)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
