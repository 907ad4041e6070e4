//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: actor startup, shutdown, and final size
//! - **Gateway calls**: one span per list/create/update/delete with the product id
//! - **Desk flow**: fetch results, dialog events, accepted and rejected drafts
//! - **Notices**: every message shown to the user, via [`TracingNotifier`](crate::notify::TracingNotifier)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads and dialog intents
//! RUST_LOG=debug cargo run
//!
//! # Only the desk
//! RUST_LOG=product_desk::desk=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` an add looks like:
//!
//! ```text
//! INFO close_dialog{event=Add}: Created entity_type="Product" id=6f1c… size=1
//! INFO close_dialog{event=Add}: Product added id=6f1c…
//! INFO close_dialog{event=Add}: Notify notice="Product added."
//! INFO Products loaded count=1 total=6.0
//! INFO Notify notice="Products loaded."
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and span names carry enough context
        .compact()
        .init();
}
