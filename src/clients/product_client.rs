//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog-specific methods.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use crate::product_actor::{ProductAction, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<ProductError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Products matching `query`, ordered by id.
    #[instrument(skip(self))]
    pub async fn products(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        let mut products = self.list(query).await?;
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    pub async fn new_products(&self) -> Result<Vec<Product>, ProductError> {
        self.products(ProductQuery::New).await
    }

    pub async fn bestsellers(&self) -> Result<Vec<Product>, ProductError> {
        self.products(ProductQuery::Bestsellers).await
    }

    pub async fn products_in_category(
        &self,
        category: impl Into<String>,
    ) -> Result<Vec<Product>, ProductError> {
        self.products(ProductQuery::Category(category.into())).await
    }

    /// Flags the product as new; clears its bestseller flag.
    pub async fn mark_new(&self, id: ProductId) -> Result<Product, ProductError> {
        self.flag(id, ProductAction::MarkNew).await
    }

    /// Flags the product as a bestseller; clears its new flag.
    pub async fn mark_bestseller(&self, id: ProductId) -> Result<Product, ProductError> {
        self.flag(id, ProductAction::MarkBestseller).await
    }

    pub async fn clear_new(&self, id: ProductId) -> Result<Product, ProductError> {
        self.flag(id, ProductAction::ClearNew).await
    }

    pub async fn clear_bestseller(&self, id: ProductId) -> Result<Product, ProductError> {
        self.flag(id, ProductAction::ClearBestseller).await
    }

    /// Clears the new flag on every product that carries it; returns the cleared ids.
    #[instrument(skip(self))]
    pub async fn clear_all_new(&self) -> Result<Vec<ProductId>, ProductError> {
        self.clear_all(ProductQuery::New, ProductAction::ClearNew)
            .await
    }

    /// Clears the bestseller flag catalog-wide; returns the cleared ids.
    #[instrument(skip(self))]
    pub async fn clear_all_bestsellers(&self) -> Result<Vec<ProductId>, ProductError> {
        self.clear_all(ProductQuery::Bestsellers, ProductAction::ClearBestseller)
            .await
    }

    async fn clear_all(
        &self,
        query: ProductQuery,
        action: ProductAction,
    ) -> Result<Vec<ProductId>, ProductError> {
        let flagged = self.products(query).await?;
        let mut cleared = Vec::with_capacity(flagged.len());
        for product in flagged {
            self.flag(product.id, action).await?;
            cleared.push(product.id);
        }
        debug!(count = cleared.len(), "Flags cleared");
        Ok(cleared)
    }

    #[instrument(skip(self))]
    async fn flag(&self, id: ProductId, action: ProductAction) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_mark_bestseller_sends_action() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.mark_bestseller(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::MarkBestseller);

        let mut product = Product::new(ProductId(1), "Shortbread", 4.0);
        product.is_bestseller = true;
        responder.send(Ok(product)).unwrap();

        let result = task.await.unwrap().unwrap();
        assert!(result.is_bestseller);
    }

    #[tokio::test]
    async fn test_entity_error_is_preserved() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.mark_new(ProductId(3)).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::ValidationError("bad".to_string()),
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::ValidationError("bad".to_string()))
        );
    }
}
