//! Payload types exchanged with Configzio.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary key/value data stored against an identity.
pub type Context = serde_json::Map<String, Value>;

/// Something a configuration value can be scoped to (a user, a device...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,

    /// Any further attributes, flattened next to `id`.
    #[serde(flatten)]
    pub attributes: Context,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Context::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// One or several identities passed to a value lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identities {
    One(Identity),
    Many(Vec<Identity>),
}

impl Identities {
    pub fn as_slice(&self) -> &[Identity] {
        match self {
            Identities::One(identity) => std::slice::from_ref(identity),
            Identities::Many(identities) => identities,
        }
    }
}

impl From<Identity> for Identities {
    fn from(identity: Identity) -> Self {
        Identities::One(identity)
    }
}

impl From<Vec<Identity>> for Identities {
    fn from(identities: Vec<Identity>) -> Self {
        Identities::Many(identities)
    }
}
