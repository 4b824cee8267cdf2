//! Provider factory and configuration integration tests.

use kc_federation::{
    ConfigPropertyType, FederationConfig, UserStorageProvider, UserStorageProviderFactory,
};
use kc_federation_dummy::config::{CONFIG_ATTRIBUTE_NAMES, CONFIG_PASSWORD_MAP};
use uuid::Uuid;

use crate::common::TestEnv;

fn config_with_pattern(pattern: &str) -> anyhow::Result<FederationConfig> {
    Ok(FederationConfig::builder()
        .realm_id(Uuid::now_v7())
        .provider_type("dummy")
        .name("legacy-migration")
        .config(CONFIG_PASSWORD_MAP, pattern)
        .build()?)
}

/// The factory publishes its identity and schema.
#[tokio::test]
async fn test_factory_metadata() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    assert_eq!(env.factory.id(), "Dummy User Federation SPI");
    assert!(env.factory.help_text().contains("Please do not use this in production"));

    let properties = env.factory.config_properties();
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].name, CONFIG_PASSWORD_MAP);
    assert_eq!(properties[0].property_type, ConfigPropertyType::String);
    assert_eq!(properties[1].name, CONFIG_ATTRIBUTE_NAMES);
    assert_eq!(
        properties[1].property_type,
        ConfigPropertyType::MultivaluedString
    );

    Ok(())
}

/// Saved configurations must carry a pattern with a roleName group.
#[tokio::test]
async fn test_configuration_validation() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    assert!(env
        .factory
        .validate_configuration(&config_with_pattern(r"(?<roleName>\w+)")?)
        .is_ok());

    for pattern in ["", r"(?<clientId>\d+)", r"roleName(\d+)", "(?<roleName>"] {
        let err = env
            .factory
            .validate_configuration(&config_with_pattern(pattern)?)
            .expect_err("pattern should be rejected");
        assert!(err.is_config_error(), "{pattern:?}");
        assert!(err.to_string().contains("at least a roleName"));
    }

    Ok(())
}

/// A provider created without a pattern falls back to the default but
/// reports its stored configuration as invalid.
#[tokio::test]
async fn test_provider_without_pattern_uses_default() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.create_role("admin").await?;
    let mut user = env.lookup("erin").await?;

    assert!(env.provider.validate_config().await.is_err());
    assert!(env.check_password(&mut user, "5:admin").await?);

    Ok(())
}

/// Configurations arrive as JSON from an admin surface.
#[tokio::test]
async fn test_configuration_from_json() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let config: FederationConfig = serde_json::from_value(serde_json::json!({
        "id": Uuid::now_v7(),
        "realm_id": env.realm_id,
        "provider_type": "dummy",
        "name": "from-json",
        "config": {
            "passwordMap": [r"(?<clientId>\d+)-(?<roleName>\w+)"],
            "groupNames": ["clientId"]
        }
    }))?;

    env.factory.validate_configuration(&config)?;
    let provider = env.factory.create(
        kc_federation::LocalStorage::new(env.users.clone(), env.roles.clone()),
        config,
    )?;

    assert_eq!(provider.config().name, "from-json");
    assert_eq!(provider.provider_type(), "dummy");
    provider.validate_config().await?;
    provider.close().await?;

    Ok(())
}
