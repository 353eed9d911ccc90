use async_trait::async_trait;
use makoti_store::framework::{ActorEntity, FrameworkError, ResourceActor};

/// A minimal entity exercising the store loop: unique codes, a fan-out query and an
/// update hook that can fail halfway through.
#[derive(Clone, Debug, PartialEq)]
struct Coupon {
    id: u32,
    code: String,
    redeemed: u32,
}

#[derive(Debug)]
struct CouponCreate {
    code: String,
}

#[derive(Debug)]
enum CouponUpdate {
    Rename(String),
    /// Redeems, then fails if the coupon is used up. The increment must not stick.
    Redeem,
}

#[derive(Debug)]
enum CouponQuery {
    All,
    Codes(Vec<String>),
}

#[derive(Debug, thiserror::Error)]
enum CouponError {
    #[error("Coupon code is empty")]
    EmptyCode,
    #[error("Coupon used up")]
    UsedUp,
}

const MAX_REDEMPTIONS: u32 = 2;

#[async_trait]
impl ActorEntity for Coupon {
    type Id = u32;
    type Create = CouponCreate;
    type Update = CouponUpdate;
    type Action = ();
    type ActionResult = ();
    type Query = CouponQuery;
    type Context = ();
    type Error = CouponError;

    fn from_create_params(id: u32, params: CouponCreate) -> Result<Self, Self::Error> {
        if params.code.is_empty() {
            return Err(CouponError::EmptyCode);
        }
        Ok(Self {
            id,
            code: params.code,
            redeemed: 0,
        })
    }

    fn matches(&self, query: &CouponQuery) -> bool {
        match query {
            CouponQuery::All => true,
            CouponQuery::Codes(codes) => codes.contains(&self.code),
        }
    }

    fn query_fan_out(query: &CouponQuery) -> usize {
        match query {
            CouponQuery::All => 1,
            CouponQuery::Codes(codes) => codes.len(),
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_update(&mut self, update: CouponUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {
            CouponUpdate::Rename(code) => {
                self.code = code;
                Ok(())
            }
            CouponUpdate::Redeem => {
                self.redeemed += 1;
                if self.redeemed > MAX_REDEMPTIONS {
                    return Err(CouponError::UsedUp);
                }
                Ok(())
            }
        }
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn create(code: &str) -> CouponCreate {
    CouponCreate {
        code: code.to_string(),
    }
}

#[tokio::test]
async fn test_unique_key_is_enforced_on_create() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let first = client.create(create("WELCOME10")).await.unwrap();
    let duplicate = client.create(create("WELCOME10")).await;
    assert!(matches!(duplicate, Err(FrameworkError::Conflict(key)) if key == "WELCOME10"));

    let all = client.list(CouponQuery::All).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, first);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_entity_errors_can_be_recovered() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let err = client.create(create("")).await.unwrap_err();
    assert!(matches!(
        err.entity_error::<CouponError>(),
        Some(CouponError::EmptyCode)
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rename_moves_the_unique_key() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let spring = client.create(create("SPRING")).await.unwrap();
    client.create(create("SUMMER")).await.unwrap();

    // Renaming onto a held code is rejected and leaves the coupon as it was.
    let clash = client
        .update(spring, CouponUpdate::Rename("SUMMER".to_string()))
        .await;
    assert!(matches!(clash, Err(FrameworkError::Conflict(_))));
    assert_eq!(client.get(spring).await.unwrap().unwrap().code, "SPRING");

    // A successful rename frees the old code for reuse.
    let renamed = client
        .update(spring, CouponUpdate::Rename("AUTUMN".to_string()))
        .await
        .unwrap();
    assert_eq!(renamed.code, "AUTUMN");
    assert!(client.create(create("SPRING")).await.is_ok());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_update_leaves_stored_entity_untouched() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(create("ONCE")).await.unwrap();
    for _ in 0..MAX_REDEMPTIONS {
        client.update(id, CouponUpdate::Redeem).await.unwrap();
    }
    let err = client.update(id, CouponUpdate::Redeem).await.unwrap_err();
    assert!(matches!(
        err.entity_error::<CouponError>(),
        Some(CouponError::UsedUp)
    ));

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.redeemed, MAX_REDEMPTIONS);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_fan_out_limit_rejects_wide_queries() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    let handle = tokio::spawn(actor.with_fan_out_limit(2).run(()));

    for code in ["A", "B", "C"] {
        client.create(create(code)).await.unwrap();
    }

    let codes = |list: &[&str]| CouponQuery::Codes(list.iter().map(|c| c.to_string()).collect());
    assert_eq!(client.list(codes(&["A", "C"])).await.unwrap().len(), 2);

    let wide = client.list(codes(&["A", "B", "C"])).await;
    assert!(matches!(
        wide,
        Err(FrameworkError::QueryTooWide {
            requested: 3,
            limit: 2
        })
    ));

    // Non-batch queries count as one key.
    assert_eq!(client.list(CouponQuery::All).await.unwrap().len(), 3);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_delete_releases_the_key() {
    let (actor, client) = ResourceActor::<Coupon>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(create("FLASH")).await.unwrap();
    client.delete(id).await.unwrap();
    assert_eq!(client.get(id).await.unwrap(), None);
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.update(id, CouponUpdate::Redeem).await,
        Err(FrameworkError::NotFound(_))
    ));

    let again = client.create(create("FLASH")).await.unwrap();
    assert_ne!(again, id);

    drop(client);
    handle.await.unwrap();
}
