use serde::{Deserialize, Serialize};

/// Represents a product row as stored by the backing service.
///
/// # Store
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be held by the in-process [`ResourceActor`](crate::framework::ResourceActor).
/// See [`gateway::store`](crate::gateway::store) for the implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier, assigned by the client before the record is sent
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `quantity` - Units in stock
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, quantity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Builds the record sent to the gateway from validated form data.
    pub fn from_draft(id: impl Into<String>, draft: &ProductDraft) -> Self {
        Self::new(id, draft.name.clone(), draft.price, draft.quantity)
    }

    /// Line value shown in the table's total column.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Form data coming back from the product dialog.
///
/// Numbers are kept as `f64` so an unparseable form field can travel as `NaN`
/// and be rejected by [`validate`](crate::validation::validate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "not_a_number")]
    pub price: f64,
    #[serde(default = "not_a_number")]
    pub quantity: f64,
}

fn not_a_number() -> f64 {
    f64::NAN
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, quantity: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            price: product.price,
            quantity: product.quantity,
        }
    }
}
