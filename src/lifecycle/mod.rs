//! Runtime wiring and lifecycle management.
//!
//! # Main Components
//!
//! - [`DeskSystem`] - Builds the gateway, spawns the store if needed, and owns the desk
//! - [`DeskConfig`] - Settings read from `product-desk.toml` and the environment
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod desk_system;
pub mod tracing;

pub use config::*;
pub use desk_system::*;
pub use self::tracing::*;
