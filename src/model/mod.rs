//! Pure data structures shared by the desk, the gateways and the dialog boundary.

pub mod dialog;
pub mod product;

pub use dialog::*;
pub use product::*;
