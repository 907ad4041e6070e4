//! Generic resource framework backing the in-process product store.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns a collection of entities
//! - [`ResourceClient`] - Type-safe handle for sending CRUD requests to the actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test callers without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
