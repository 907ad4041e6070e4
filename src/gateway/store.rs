//! # Store Gateway
//!
//! Provides a [`ProductGateway`] over an in-process `ResourceActor<Product>`.
//! It plays the part of a local REST mock server: same verbs, same failure
//! modes, no network.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{GatewayError, ProductGateway};
use crate::framework::{ActorEntity, ResourceActor, ResourceClient};
use crate::model::{Product, ProductDraft};
use crate::validation::validate;

impl ActorEntity for Product {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    /// The store enforces the same rules as the desk, like a server would.
    fn validate(&self) -> Result<(), String> {
        validate(Some(&ProductDraft::from(self))).map_err(|e| e.to_string())
    }
}

/// Gateway backed by the in-process product store.
#[derive(Clone)]
pub struct StoreGateway {
    inner: ResourceClient<Product>,
}

impl StoreGateway {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

/// Creates a new product store actor and a gateway talking to it.
///
/// The actor is not started; spawn `actor.run()` on the runtime.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, StoreGateway) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, StoreGateway::new(client))
}

#[async_trait]
impl ProductGateway for StoreGateway {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn create(&self, product: &Product) -> Result<(), GatewayError> {
        debug!("Sending request");
        self.inner.create(product.clone()).await?;
        Ok(())
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn update(&self, product: &Product) -> Result<(), GatewayError> {
        debug!("Sending request");
        self.inner.update(product.clone()).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        debug!("Sending request");
        Ok(self.inner.delete(id.to_string()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_delete, expect_list};
    use crate::framework::FrameworkError;

    #[tokio::test]
    async fn test_list_returns_store_contents() {
        let (actor, gateway) = new(8);
        tokio::spawn(
            actor
                .with_items([Product::new("a", "Pen", 2.0, 3.0), Product::new("b", "Ink", 1.0, 1.0)])
                .run(),
        );

        let products = gateway.list().await.unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_store_rejects_invalid_and_unknown_records() {
        let (actor, gateway) = new(8);
        tokio::spawn(actor.run());

        let invalid = Product::new("a", "", 2.0, 3.0);
        assert_eq!(
            gateway.create(&invalid).await,
            Err(GatewayError::Rejected("Error: name must not be empty.".into()))
        );

        let ghost = Product::new("ghost", "Pen", 2.0, 3.0);
        assert_eq!(gateway.update(&ghost).await, Err(GatewayError::NotFound("ghost".into())));

        let pen = Product::new("a", "Pen", 2.0, 3.0);
        gateway.create(&pen).await.unwrap();
        assert_eq!(gateway.create(&pen).await, Err(GatewayError::Conflict("a".into())));
    }

    #[tokio::test]
    async fn test_delete_forwards_identifier() {
        let (client, mut receiver) = create_mock_client::<Product>(4);
        let gateway = StoreGateway::new(client);

        let task = tokio::spawn(async move { gateway.delete("abc").await });

        let (id, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, "abc");
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_dropped_responder_reports_unavailable() {
        let (client, mut receiver) = create_mock_client::<Product>(4);
        let gateway = StoreGateway::new(client);

        let task = tokio::spawn(async move { gateway.list().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        drop(responder);

        assert_eq!(task.await.unwrap(), Err(GatewayError::Unavailable));
        assert_eq!(
            GatewayError::from(FrameworkError::Rejected("no".into())),
            GatewayError::Rejected("no".into())
        );
    }
}
