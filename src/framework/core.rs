//! # Core Resource Framework
//!
//! This module defines the generic building blocks behind the in-process product store.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all stored resource types must implement.
//! - [`ResourceActor`]: The generic actor that owns a collection of entities.
//! - [`ResourceClient`]: The generic client for communicating with the actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any resource entity must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// Identifiers are assigned by the caller before the record is sent, so the
/// entity only has to expose the one it carries. The actor never invents ids.
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::validate`] runs before a record is inserted or replaced.
///   The default accepts everything.
pub trait ActorEntity: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The identifier carried by this record.
    fn id(&self) -> &Self::Id;

    /// Rejects records the store must not accept.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the resource framework itself.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the four verbs of a REST collection:
///
/// - **List**: `GET /collection`, every stored record in insertion order.
/// - **Create**: `POST /collection`, the record carries its own id.
/// - **Update**: `PUT /collection/{id}`, the record replaces the stored one.
/// - **Delete**: `DELETE /collection/{id}`.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        item: T,
        respond_to: Response<T::Id>,
    },
    Update {
        item: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel. Messages are processed sequentially,
/// so the map needs no lock.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Seeds the store before the loop starts. Records failing
    /// [`ActorEntity::validate`] or reusing an id are skipped.
    pub fn with_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            if let Err(e) = self.insert(item) {
                warn!(error = %e, "Seed skipped");
            }
        }
        self
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Product" instead of "product_desk::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Create { item, respond_to } => {
                    debug!(entity_type, ?item, "Create");
                    let result = self.insert(item);
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update { item, respond_to } => {
                    let id = item.id().clone();
                    debug!(entity_type, %id, ?item, "Update");
                    if let Err(e) = item.validate() {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        continue;
                    }
                    if let Some(slot) = self.store.get_mut(&id) {
                        *slot = item.clone();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        self.order.retain(|existing| existing != &id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn insert(&mut self, item: T) -> Result<T::Id, FrameworkError> {
        item.validate().map_err(FrameworkError::Rejected)?;
        let id = item.id().clone();
        if self.store.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        self.order.push(id.clone());
        self.store.insert(id.clone(), item);
        Ok(id)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, item: T) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { item, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, item: T) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update { item, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        body: String,
    }

    impl ActorEntity for Note {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn validate(&self) -> Result<(), String> {
            if self.body.is_empty() {
                return Err("empty body".to_string());
            }
            Ok(())
        }
    }

    fn note(id: u32, body: &str) -> Note {
        Note { id, body: body.to_string() }
    }

    #[tokio::test]
    async fn test_resource_actor_crud_cycle() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.run());

        // 1. Create keeps the caller's id
        assert_eq!(client.create(note(7, "first")).await.unwrap(), 7);
        assert_eq!(client.create(note(3, "second")).await.unwrap(), 3);

        // 2. List preserves insertion order
        let items = client.list().await.unwrap();
        assert_eq!(items, vec![note(7, "first"), note(3, "second")]);

        // 3. Update replaces the stored record
        let updated = client.update(note(7, "edited")).await.unwrap();
        assert_eq!(updated.body, "edited");

        // 4. Delete removes it from the listing
        client.delete(7).await.unwrap();
        assert_eq!(client.list().await.unwrap(), vec![note(3, "second")]);
    }

    #[tokio::test]
    async fn test_resource_actor_rejections() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.with_items([note(1, "seed")]).run());

        assert_eq!(
            client.create(note(1, "dup")).await,
            Err(FrameworkError::AlreadyExists("1".to_string()))
        );
        assert_eq!(
            client.create(note(2, "")).await,
            Err(FrameworkError::Rejected("empty body".to_string()))
        );
        assert_eq!(
            client.update(note(9, "ghost")).await,
            Err(FrameworkError::NotFound("9".to_string()))
        );
        assert_eq!(client.delete(9).await, Err(FrameworkError::NotFound("9".to_string())));
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Note>::new(1);
        drop(actor);
        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
