//! JSON-RPC API Layer
//!
//! Exposes the application tracker operations as JSON-RPC 2.0 methods plus a
//! live-list subscription.

pub mod auth;
pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use auth::StaticTokenIdentityProvider;
pub use server::{RpcServer, RpcServerConfig};
