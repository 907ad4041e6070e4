//! # Mock Framework
//!
//! Utilities for testing code that talks to a [`ResourceClient`] without spawning
//! a real [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_list`] or [`expect_delete`] to inspect each
//! request and answer it through the returned responder.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// Responder half handed back by the `expect_*` helpers.
pub type Responder<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// The client sends messages to a channel the test controls. The test reads
/// each request off `receiver`, asserts on it and decides when and how to
/// answer. This makes timing deterministic: a request can be left pending
/// while the caller is torn down, then answered afterwards.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Asserts that no request is waiting on the channel.
pub fn expect_idle<T: ActorEntity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) {
    if let Ok(request) = receiver.try_recv() {
        panic!("Unexpected request: {:?}", request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    #[tokio::test]
    async fn test_mock_client_create() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move {
            client.create(Product::new("p-1", "Pen", 2.0, 3.0)).await
        });

        let (item, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(item.name, "Pen");
        responder.send(Ok(item.id.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("p-1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_client_wrong_kind_returns_none() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let _task = tokio::spawn(async move { client.delete("p-1".to_string()).await });

        assert!(expect_list(&mut receiver).await.is_none());
        expect_idle(&mut receiver);
    }
}
