//! Credential domain model.
//!
//! A credential input is what a user presents during authentication:
//! a type tag plus, for value-bearing kinds, the raw secret. Providers
//! decide from the type tag whether they can validate the input at all.

use std::fmt;

/// Credential type tags.
///
/// Tags are compared exactly; `"Password"` is not `password`.
pub mod credential_types {
    /// Password credential.
    pub const PASSWORD: &str = "password";
}

/// A credential presented for validation.
///
/// The type tag is a free-form string so that providers can be asked about
/// kinds they do not know.
pub trait CredentialInput: Send + Sync + fmt::Debug {
    /// Returns the credential type tag.
    fn credential_type(&self) -> &str;

    /// Returns the presented secret, if this input carries one.
    fn value(&self) -> Option<&str> {
        None
    }
}

/// A value-bearing credential input (e.g., a typed password).
///
/// ## Security Note
///
/// The `Debug` implementation redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredential {
    credential_type: String,
    value: String,
}

impl UserCredential {
    /// Creates a credential input of an arbitrary type.
    #[must_use]
    pub fn new(credential_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            credential_type: credential_type.into(),
            value: value.into(),
        }
    }

    /// Creates a password credential input.
    #[must_use]
    pub fn password(value: impl Into<String>) -> Self {
        Self::new(credential_types::PASSWORD, value)
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("credential_type", &self.credential_type)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl CredentialInput for UserCredential {
    fn credential_type(&self) -> &str {
        &self.credential_type
    }

    fn value(&self) -> Option<&str> {
        Some(&self.value)
    }
}
