//! What the desk publishes to the rendering layer.

use std::sync::Arc;

use crate::aggregation::total;
use crate::model::{DialogAction, Product};

/// Where the desk is in its fetch/dialog cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeskPhase {
    /// Not initialized yet, or disposed.
    #[default]
    Idle,
    /// A list fetch is in flight.
    Loading,
    /// The latest snapshot is on screen.
    Displaying,
    /// A dialog is open for this action.
    DialogOpen(DialogAction),
}

/// One fetched collection and its derived total. Never patched in place.
#[derive(Debug, Default, PartialEq)]
pub struct ProductSnapshot {
    pub products: Vec<Product>,
    pub total: f64,
}

impl ProductSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        let total = total(&products);
        Self { products, total }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Phase plus the snapshot to render.
#[derive(Debug, Clone, Default)]
pub struct DeskView {
    pub phase: DeskPhase,
    pub snapshot: Arc<ProductSnapshot>,
}
