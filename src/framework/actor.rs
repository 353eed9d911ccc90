//! # Generic Store Actor
//!
//! `ResourceActor` is the "server" half of a store. It owns the in-memory collection for
//! one entity type and processes every `ResourceRequest` sequentially in its own Tokio
//! task, so the collection needs no locks.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client`.
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// # Implementation Details
///
/// * **Create**: assigns the next sequential ID, builds the entity, rejects it with
///   [`FrameworkError::Conflict`] if its [`unique_key`](ActorEntity::unique_key) is
///   already held, runs `on_create`, then inserts it and indexes the key.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **List**: returns clones of every entity matching the query. When a fan-out limit
///   is configured, wider queries fail with [`FrameworkError::QueryTooWide`].
/// * **Update** / **Action**: work on a copy; the stored entity is replaced only when
///   the hook succeeds and the unique key stays free.
/// * **Delete**: runs `on_delete`, removes the entity and releases its key.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    unique_index: HashMap<String, T::Id>,
    max_fan_out: Option<usize>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            unique_index: HashMap::new(),
            max_fan_out: None,
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Caps the number of keys a single `List` query may ask for.
    pub fn with_fan_out_limit(mut self, limit: usize) -> Self {
        self.max_fan_out = Some(limit);
        self
    }

    fn key_taken_by_other(&self, key: &Option<String>, id: &T::Id) -> Option<String> {
        let key = key.as_ref()?;
        match self.unique_index.get(key) {
            Some(owner) if owner != id => Some(key.clone()),
            _ => None,
        }
    }

    fn reindex(&mut self, id: &T::Id, old_key: Option<String>, new_key: Option<String>) {
        if old_key == new_key {
            return;
        }
        if let Some(old) = old_key {
            self.unique_index.remove(&old);
        }
        if let Some(new) = new_key {
            self.unique_index.insert(new, id.clone());
        }
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Review" instead of "makoti_store::model::review::Review")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };

                    let key = item.unique_key();
                    if let Some(taken) = self.key_taken_by_other(&key, &id) {
                        warn!(entity_type, key = %taken, "Unique key conflict");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(taken)));
                        continue;
                    }

                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    self.reindex(&id, None, key);
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let requested = T::query_fan_out(&query);
                    if let Some(limit) = self.max_fan_out {
                        if requested > limit {
                            warn!(entity_type, requested, limit, "Query too wide");
                            let _ = respond_to
                                .send(Err(FrameworkError::QueryTooWide { requested, limit }));
                            continue;
                        }
                    }
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let old_key = current.unique_key();
                    let mut item = current.clone();

                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let new_key = item.unique_key();
                    if let Some(taken) = self.key_taken_by_other(&new_key, &id) {
                        warn!(entity_type, %id, key = %taken, "Unique key conflict");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(taken)));
                        continue;
                    }

                    self.reindex(&id, old_key, new_key);
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let key = item.unique_key();
                    self.reindex(&id, key, None);
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let old_key = current.unique_key();
                    let mut item = current.clone();

                    let result = match item.handle_action(action, &context).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    let new_key = item.unique_key();
                    if let Some(taken) = self.key_taken_by_other(&new_key, &id) {
                        warn!(entity_type, %id, key = %taken, "Unique key conflict");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(taken)));
                        continue;
                    }

                    self.reindex(&id, old_key, new_key);
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, "Action ok");
                    let _ = respond_to.send(Ok(result));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
