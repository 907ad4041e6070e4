#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Product Desk
//!
//! > **The client-side core of a product table: fetch, total, dialog, validate, mutate, refetch.**
//!
//! This crate holds everything a product CRUD screen does apart from drawing
//! itself. A renderer subscribes to [`desk::ProductDesk`] for snapshots, shows
//! dialogs for the intents the desk hands out, and passes the dialog results
//! back in.
//!
//! ## 🏗️ Design
//!
//! ### Server snapshots only
//! The desk never patches its list. Every successful add, edit or delete is
//! followed by a fresh `list()`, and the new [`desk::ProductSnapshot`] fully
//! replaces the previous one. The total is recomputed from each snapshot.
//!
//! ### Gateways behind a trait
//! [`gateway::ProductGateway`] is the only way out of the desk. The REST
//! gateway talks to a JSON collection endpoint; the store gateway talks to an
//! in-process actor built on the generic [`framework`] and behaves like a
//! small mock server.
//!
//! ### Typed dialog boundary
//! Event names coming back from the dialog are decoded once into
//! [`model::DialogEvent`]. Unknown events are ignored.
//!
//! ## 🗺️ Module Tour
//!
//! - [`validation`] and [`aggregation`]: pure functions over products.
//! - [`gateway`]: the CRUD seam and its two backends.
//! - [`notify`]: the notification sink the desk reports through.
//! - [`desk`]: the orchestrator and the view it publishes.
//! - [`framework`]: the generic resource actor behind the in-process store,
//!   plus [`framework::mock`] for driving it from tests.
//! - [`lifecycle`]: configuration, tracing setup, and [`lifecycle::DeskSystem`].
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! # In-process store
//! RUST_LOG=info cargo run
//!
//! # Against a REST service
//! PRODUCT_DESK_API_URL=http://localhost:3001/products RUST_LOG=info cargo run
//! ```

pub mod aggregation;
pub mod desk;
pub mod framework;
pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod validation;
