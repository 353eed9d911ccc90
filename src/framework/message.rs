//! Requests a [`ResourceClient`](super::ResourceClient) sends to its
//! [`ResourceActor`](super::ResourceActor). Each carries the sender half of a oneshot
//! channel the actor answers on.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// Reply channel for one request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// One store operation. `Create`, `Update` and `Action` carry the entity's own payload
/// types; `List` carries its [`Query`](ActorEntity::Query).
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
