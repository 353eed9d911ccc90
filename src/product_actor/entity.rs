//! Entity trait implementation for the Product domain type.
//!
//! Includes the catalog flag actions (see [`ProductAction`]).

use super::actions::ProductAction;
use super::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use async_trait::async_trait;

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!(
            "invalid price: {}",
            price
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = Product;
    type Query = ProductQuery;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters. Both flags start cleared.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        let mut product = Self::new(id, params.name, params.price);
        product.description = params.description;
        product.image_url = params.image_url;
        product.category = params.category;
        Ok(product)
    }

    fn matches(&self, query: &ProductQuery) -> bool {
        match query {
            ProductQuery::All => true,
            ProductQuery::New => self.is_new,
            ProductQuery::Bestsellers => self.is_bestseller,
            ProductQuery::Category(category) => self.category.as_deref() == Some(category.as_str()),
        }
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`, `description`, `price`, `image_url`, `category`
    ///
    /// Catalog flags are not updatable here; use [`ProductAction`].
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        Ok(())
    }

    /// Applies a flag action and returns the updated product.
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<Product, Self::Error> {
        match action {
            ProductAction::MarkNew => {
                self.is_new = true;
                self.is_bestseller = false;
            }
            ProductAction::MarkBestseller => {
                self.is_bestseller = true;
                self.is_new = false;
            }
            ProductAction::ClearNew => self.is_new = false,
            ProductAction::ClearBestseller => self.is_bestseller = false,
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flags_are_mutually_exclusive() {
        let mut product = Product::new(ProductId(1), "Koeksister", 2.5);

        let after = product
            .handle_action(ProductAction::MarkNew, &())
            .await
            .unwrap();
        assert!(after.is_new && !after.is_bestseller);

        let after = product
            .handle_action(ProductAction::MarkBestseller, &())
            .await
            .unwrap();
        assert!(!after.is_new && after.is_bestseller);

        let after = product
            .handle_action(ProductAction::ClearBestseller, &())
            .await
            .unwrap();
        assert!(!after.is_new && !after.is_bestseller);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let params = ProductCreate {
            name: "Rusk".to_string(),
            price: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Product::from_create_params(ProductId(1), params),
            Err(ProductError::ValidationError(_))
        ));
    }
}
