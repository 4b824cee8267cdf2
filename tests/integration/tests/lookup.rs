//! User lookup integration tests.

use kc_federation::{StorageId, UserLookupProvider};
use kc_storage::UserProvider;

use crate::common::TestEnv;

/// Every username resolves to a freshly created local user.
#[tokio::test]
async fn test_lookup_materializes_local_user() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let user = env.lookup("alice").await?;

    assert_eq!(user.username, "alice");
    assert_eq!(user.email.as_deref(), Some("alice"), "Email mirrors username");
    assert!(user.enabled);
    assert!(user.email_verified);
    assert_eq!(user.first_name.as_deref(), Some("Dummy"));
    assert_eq!(user.last_name.as_deref(), Some("Migration"));
    assert_eq!(
        user.federation_link.as_deref(),
        Some(env.provider.federation_link().as_str())
    );
    assert!(user.attributes.is_empty(), "New users start unmigrated");

    let stored = env
        .users
        .get_by_username(env.realm_id, "alice")
        .await?
        .ok_or_else(|| anyhow::anyhow!("user was not persisted"))?;
    assert_eq!(stored.id, user.id);

    Ok(())
}

/// A second lookup of the same username is refused by the local store.
#[tokio::test]
async fn test_repeated_lookup_is_rejected_by_store() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.lookup("alice").await?;
    let err = env
        .provider
        .get_user_by_username(env.realm_id, "alice")
        .await
        .expect_err("Duplicate username should fail");

    assert!(err.is_creation_error());
    assert!(err.to_string().contains("alice"));
    assert_eq!(env.users.count(env.realm_id).await, 1);

    Ok(())
}

/// Composite ids resolve by their external part.
#[tokio::test]
async fn test_lookup_by_composite_id() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let id = StorageId::new(env.provider.federation_link(), "bob");

    let user = env
        .provider
        .get_user_by_id(env.realm_id, &id.to_string())
        .await?
        .ok_or_else(|| anyhow::anyhow!("no user for composite id"))?;

    assert_eq!(user.username, "bob");
    assert_eq!(user.email.as_deref(), Some("bob"));

    Ok(())
}

/// Email lookup never resolves and never creates users.
#[tokio::test]
async fn test_lookup_by_email_returns_none() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let user = env
        .provider
        .get_user_by_email(env.realm_id, "alice@example.com")
        .await?;

    assert!(user.is_none());
    assert_eq!(env.users.count(env.realm_id).await, 0);

    Ok(())
}
