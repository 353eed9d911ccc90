//! # Cart Client
//!
//! Provides a high-level API for interacting with the `Cart` actor, including the
//! sign-in merge of an anonymous cart into the account cart.
use crate::cart_actor::{CartAction, CartError};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, CartItem, CartQuery, ProductId, UserId};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<CartError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            FrameworkError::Conflict(key) => CartError::AlreadyExists(key),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_cart(&self, params: CartCreate) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Creates an empty cart for a visitor who has not signed in.
    pub async fn create_anonymous_cart(&self) -> Result<Cart, CartError> {
        let id = self.create_cart(CartCreate::default()).await?;
        self.get(id)
            .await?
            .ok_or_else(|| CartError::NotFound(id.to_string()))
    }

    /// The user's account cart, created empty if they have none yet.
    #[instrument(skip(self))]
    pub async fn cart_for_user(&self, user_id: &UserId) -> Result<Cart, CartError> {
        if let Some(cart) = self.find_user_cart(user_id).await? {
            return Ok(cart);
        }

        let params = CartCreate {
            user_id: Some(user_id.clone()),
            items: Vec::new(),
        };
        match self.create_cart(params).await {
            Ok(id) => self
                .get(id)
                .await?
                .ok_or_else(|| CartError::NotFound(id.to_string())),
            // Another request created it between our lookup and create.
            Err(CartError::AlreadyExists(_)) => self
                .find_user_cart(user_id)
                .await?
                .ok_or_else(|| CartError::NotFound(user_id.to_string())),
            Err(e) => Err(e),
        }
    }

    async fn find_user_cart(&self, user_id: &UserId) -> Result<Option<Cart>, CartError> {
        let carts = self.list(CartQuery::ByUser(user_id.clone())).await?;
        Ok(carts.into_iter().next())
    }

    pub async fn add_item(&self, id: CartId, item: CartItem) -> Result<Cart, CartError> {
        self.act(id, CartAction::AddItem(item)).await
    }

    pub async fn remove_item(&self, id: CartId, product_id: ProductId) -> Result<Cart, CartError> {
        self.act(id, CartAction::RemoveItem(product_id)).await
    }

    /// Zero or a negative quantity removes the line.
    pub async fn set_quantity(
        &self,
        id: CartId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        self.act(id, CartAction::SetQuantity(product_id, quantity))
            .await
    }

    pub async fn clear(&self, id: CartId) -> Result<Cart, CartError> {
        self.act(id, CartAction::Clear).await
    }

    /// Reconciles a visitor's anonymous cart with their account at sign-in.
    ///
    /// The anonymous cart is consumed: its lines are merged into the account cart (union
    /// by product id, quantities summed, account pricing kept). Its stored copy is deleted
    /// only while it is still anonymous and holds exactly the merged lines; a stored cart
    /// that differs belongs to someone else and is left alone. Returns the merged account
    /// cart.
    #[instrument(skip(self, anonymous), fields(anonymous = %anonymous.id))]
    pub async fn sign_in(&self, user_id: &UserId, anonymous: Cart) -> Result<Cart, CartError> {
        if !anonymous.is_anonymous() {
            return Err(CartError::NotAnonymous(anonymous.id.to_string()));
        }
        let anonymous_id = anonymous.id;
        let lines = anonymous.items;
        let account = self.cart_for_user(user_id).await?;

        let merged = if lines.is_empty() {
            account
        } else {
            self.act(account.id, CartAction::Absorb(lines.clone()))
                .await?
        };

        // The visitor's cart may only have lived client-side.
        if let Some(stored) = self.get(anonymous_id).await? {
            if stored.is_anonymous() && stored.items == lines {
                match self.delete(anonymous_id).await {
                    Ok(()) | Err(CartError::NotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        info!(cart = %merged.id, items = merged.item_count(), "Anonymous cart merged");
        Ok(merged)
    }

    #[instrument(skip(self))]
    async fn act(&self, id: CartId, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}
