//! Dummy provider configuration.
//!
//! Two properties drive the provider:
//!
//! - `passwordMap`: a regular expression with named groups, which must
//!   declare a `roleName` group
//! - `groupNames`: the named groups to copy onto the user as attributes

use kc_federation::config::{ConfigPropertyType, FederationConfig, ProviderConfigProperty};
use kc_federation::error::{FederationError, FederationResult};
use regex::Regex;

/// Config key for the password pattern.
pub const CONFIG_PASSWORD_MAP: &str = "passwordMap";

/// Config key for the named groups stored as attributes.
pub const CONFIG_ATTRIBUTE_NAMES: &str = "groupNames";

/// Default password pattern: `<clientId>:<roleName>`.
pub const DEFAULT_PASSWORD_MAP: &str = r"(?<clientId>\d+):(?<roleName>\w+)";

/// Default named groups stored as attributes.
pub const DEFAULT_ATTRIBUTE_NAMES: &[&str] = &["clientId"];

/// Named group holding the realm role to grant.
pub const ROLE_NAME_GROUP: &str = "roleName";

const INVALID_PASSWORD_MAP: &str =
    "Password is invalid. Please use a regular expression with named groups that contains at least a roleName";

/// Builds the configuration schema published by the provider factory.
#[must_use]
pub fn config_properties() -> Vec<ProviderConfigProperty> {
    vec![
        ProviderConfigProperty::new(CONFIG_PASSWORD_MAP, ConfigPropertyType::String)
            .label("Password field mapper")
            .default_value(DEFAULT_PASSWORD_MAP)
            .help_text(
                "Using a regexp named groups to map a string to specific portions. \
                 E.g. The example has 2 named groups",
            ),
        ProviderConfigProperty::new(CONFIG_ATTRIBUTE_NAMES, ConfigPropertyType::MultivaluedString)
            .label("Comma separated list of named groups in the expression to process as attributes")
            .default_value(DEFAULT_ATTRIBUTE_NAMES.join(","))
            .help_text("Using this property, one can pass in attributes onto the user"),
    ]
}

/// Compiled migration settings of one provider instance.
///
/// The shorthand classes `\d`, `\w` and `\s` (and their negations) match
/// ASCII only, so `(?<roleName>\w+)` stops at the first non-ASCII letter.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    source: String,
    pattern: Regex,
    attribute_names: Vec<String>,
}

impl MigrationConfig {
    /// Compiles a migration config.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::Configuration` if the pattern does not compile.
    pub fn new(pattern: &str, attribute_names: Vec<String>) -> FederationResult<Self> {
        Ok(Self {
            source: pattern.to_string(),
            pattern: compile(pattern)?,
            attribute_names,
        })
    }

    /// Reads the migration settings from a provider configuration.
    ///
    /// Missing properties fall back to their defaults.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::Configuration` if the pattern does not compile.
    pub fn from_federation_config(config: &FederationConfig) -> FederationResult<Self> {
        let pattern = config
            .get(CONFIG_PASSWORD_MAP)
            .unwrap_or(DEFAULT_PASSWORD_MAP);
        let attribute_names = config.get_list(CONFIG_ATTRIBUTE_NAMES).unwrap_or_else(|| {
            DEFAULT_ATTRIBUTE_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect()
        });

        Self::new(pattern, attribute_names)
    }

    /// Checks that a provider configuration carries a usable pattern.
    ///
    /// The pattern must be present, non-empty, compile, and declare a
    /// `roleName` group.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::Configuration` otherwise.
    pub fn validate(config: &FederationConfig) -> FederationResult<()> {
        let pattern = config
            .get(CONFIG_PASSWORD_MAP)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| FederationError::config(INVALID_PASSWORD_MAP))?;

        let regex = compile(pattern).map_err(|_| FederationError::config(INVALID_PASSWORD_MAP))?;
        if !regex.capture_names().flatten().any(|name| name == ROLE_NAME_GROUP) {
            return Err(FederationError::config(INVALID_PASSWORD_MAP));
        }

        Ok(())
    }

    /// Returns the compiled password pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Returns the pattern as configured.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the named groups stored as attributes, in order.
    #[must_use]
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }
}

fn compile(pattern: &str) -> FederationResult<Regex> {
    Regex::new(&ascii_shorthand_classes(pattern)).map_err(|e| {
        tracing::warn!(pattern = %pattern, error = %e, "Invalid regular expression");
        FederationError::config(format!("Invalid regular expression: {e}"))
    })
}

/// Rewrites `\d`, `\w`, `\s` and their negations as explicit ASCII classes.
///
/// Escaped backslashes are copied through untouched. The rewritten classes
/// are bracketed, so they stay valid inside a character class as well.
fn ascii_shorthand_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str("[0-9]"),
            Some('D') => out.push_str("[^0-9]"),
            Some('w') => out.push_str("[0-9A-Za-z_]"),
            Some('W') => out.push_str("[^0-9A-Za-z_]"),
            Some('s') => out.push_str(r"[\t\n\x0B\x0C\r ]"),
            Some('S') => out.push_str(r"[^\t\n\x0B\x0C\r ]"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
