//! Password migration integration tests.

use kc_federation::CredentialInputValidator;
use kc_federation_dummy::migrator::MIGRATED_ATTRIBUTE;
use kc_model::user::required_actions;
use kc_model::UserCredential;
use kc_storage::UserProvider;

use crate::common::TestEnv;

/// The default pattern grants the role and stores the client id.
#[tokio::test]
async fn test_default_pattern_migrates_user() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let admin = env.create_role("admin").await?;
    let mut user = env.lookup("alice").await?;

    assert!(env.check_password(&mut user, "28:admin").await?);

    assert_eq!(user.get_first_attribute(MIGRATED_ATTRIBUTE), Some("true"));
    assert_eq!(user.get_first_attribute("clientId"), Some("28"));
    assert!(user.has_required_action(required_actions::UPDATE_PASSWORD));
    assert!(env.users.has_role(env.realm_id, user.id, admin.id).await?);

    let stored = env
        .users
        .get_by_id(env.realm_id, user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("user vanished"))?;
    assert_eq!(stored.get_first_attribute(MIGRATED_ATTRIBUTE), Some("true"));
    assert!(stored.has_required_action(required_actions::UPDATE_PASSWORD));

    Ok(())
}

/// Shorthand classes are ASCII: the role name ends before a non-ASCII letter
/// and non-ASCII digits never count as a client id.
#[tokio::test]
async fn test_shorthand_classes_are_ascii() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let admin = env.create_role("admin").await?;

    let mut alice = env.lookup("alice").await?;
    assert!(env.check_password(&mut alice, "28:adminé").await?);
    assert!(env.users.has_role(env.realm_id, alice.id, admin.id).await?);

    let mut bob = env.lookup("bob").await?;
    assert!(!env.check_password(&mut bob, "٢٨:admin").await?);
    assert!(bob.get_first_attribute(MIGRATED_ATTRIBUTE).is_none());
    assert!(env.users.get_roles(env.realm_id, bob.id).await?.is_empty());

    Ok(())
}

/// An unknown role is skipped but the user is still migrated.
#[tokio::test]
async fn test_unknown_role_still_migrates() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut user = env.lookup("alice").await?;

    assert!(env.check_password(&mut user, "7:ghost").await?);

    assert_eq!(user.get_first_attribute(MIGRATED_ATTRIBUTE), Some("true"));
    assert_eq!(user.get_first_attribute("clientId"), Some("7"));
    assert!(env.users.get_roles(env.realm_id, user.id).await?.is_empty());

    Ok(())
}

/// After migration any password is accepted without side effects.
#[tokio::test]
async fn test_migrated_user_accepts_any_password() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.create_role("admin").await?;
    let mut user = env.lookup("alice").await?;
    assert!(env.check_password(&mut user, "28:admin").await?);

    let before = user.clone();
    assert!(env.check_password(&mut user, "99:other").await?);
    assert!(env.check_password(&mut user, "no structure at all").await?);

    assert_eq!(user.attributes, before.attributes);
    assert_eq!(user.required_actions, before.required_actions);
    assert_eq!(env.users.get_roles(env.realm_id, user.id).await?.len(), 1);

    Ok(())
}

/// Only the exact value "true" marks a user as migrated.
#[tokio::test]
async fn test_migrated_flag_must_be_exact() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut user = env.lookup("alice").await?;
    user.set_single_attribute(MIGRATED_ATTRIBUTE, "TRUE");

    assert!(
        !env.check_password(&mut user, "no digits here").await?,
        "TRUE is not migrated so the password must parse"
    );
    assert_eq!(user.get_first_attribute(MIGRATED_ATTRIBUTE), Some("TRUE"));

    Ok(())
}

/// A non-matching password is rejected and leaves the user untouched.
#[tokio::test]
async fn test_unmatched_password_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut user = env.lookup("alice").await?;

    assert!(!env.check_password(&mut user, "hunter2").await?);

    assert!(user.get_first_attribute(MIGRATED_ATTRIBUTE).is_none());
    assert!(user.required_actions.is_empty());

    Ok(())
}

/// Credential kinds other than password are never validated.
#[tokio::test]
async fn test_non_password_credential_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut user = env.lookup("alice").await?;
    user.set_single_attribute(MIGRATED_ATTRIBUTE, "true");

    let otp = UserCredential::new("otp", "28:admin");
    assert!(!env.provider.is_valid(env.realm_id, &mut user, &otp).await?);
    assert!(!env.provider.supports_credential_type("otp"));
    assert!(env.provider.is_configured_for(env.realm_id, &user, "password"));

    Ok(())
}

/// A custom pattern copies only the configured groups.
#[tokio::test]
async fn test_custom_pattern_and_attributes() -> anyhow::Result<()> {
    let env = TestEnv::with_config(
        Some(r"(?<tenant>[a-z]+)/(?<clientId>\d+)/(?<roleName>\w+)"),
        Some("tenant, clientId, missing"),
    )
    .await?;
    let auditor = env.create_role("auditor").await?;
    let mut user = env.lookup("carol").await?;

    assert!(env.check_password(&mut user, "acme/12/auditor").await?);

    assert_eq!(user.get_first_attribute("tenant"), Some("acme"));
    assert_eq!(user.get_first_attribute("clientId"), Some("12"));
    assert!(user.get_first_attribute("missing").is_none());
    assert!(user.get_first_attribute("roleName").is_none());
    assert!(env.users.has_role(env.realm_id, user.id, auditor.id).await?);

    Ok(())
}

/// A pattern without capture groups never migrates anyone.
#[tokio::test]
async fn test_pattern_without_groups_rejects_everything() -> anyhow::Result<()> {
    let env = TestEnv::with_config(Some(r"\d+:\w+"), None).await?;
    let mut user = env.lookup("dave").await?;

    assert!(!env.check_password(&mut user, "28:admin").await?);
    assert!(user.get_first_attribute(MIGRATED_ATTRIBUTE).is_none());

    Ok(())
}
