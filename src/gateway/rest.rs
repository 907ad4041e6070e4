//! # REST Gateway
//!
//! JSON over HTTP against a product collection endpoint:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET {base}` |
//! | create    | `POST {base}` with the record as body |
//! | update    | `PUT {base}/{id}` with the record as body |
//! | delete    | `DELETE {base}/{id}` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

use super::{GatewayError, ProductGateway};
use crate::model::Product;

/// Gateway speaking to a remote product service.
#[derive(Clone, Debug)]
pub struct RestGateway {
    http: Client,
    base: Url,
}

impl RestGateway {
    /// Builds a gateway for the collection at `base` (e.g. `http://localhost:3001/products`).
    pub fn new(base: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base = Url::parse(base).map_err(|e| GatewayError::InvalidUrl(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(base.to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn item_url(&self, id: &str) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl ProductGateway for RestGateway {
    #[instrument(skip(self), fields(url = %self.base))]
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        debug!("Sending request");
        let response = self.http.get(self.base.clone()).send().await?;
        let products = ensure_success(response)?.json::<Vec<Product>>().await?;
        debug!(count = products.len(), "Received products");
        Ok(products)
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn create(&self, product: &Product) -> Result<(), GatewayError> {
        debug!("Sending request");
        let response = self.http.post(self.base.clone()).json(product).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn update(&self, product: &Product) -> Result<(), GatewayError> {
        debug!("Sending request");
        let url = self.item_url(&product.id)?;
        let response = self.http.put(url).json(product).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        debug!("Sending request");
        let url = self.item_url(id)?;
        let response = self.http.delete(url).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}
