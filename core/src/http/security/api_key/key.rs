//! API key model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::ApiKeyError;

/// Management console role carried by an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SecurityOfficer,
    RegistrationOfficer,
    ServiceAdministrator,
    SystemAdministrator,
    ServerObserver,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SecurityOfficer,
        Role::RegistrationOfficer,
        Role::ServiceAdministrator,
        Role::SystemAdministrator,
        Role::ServerObserver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SecurityOfficer => "SECURITY_OFFICER",
            Role::RegistrationOfficer => "REGISTRATION_OFFICER",
            Role::ServiceAdministrator => "SERVICE_ADMINISTRATOR",
            Role::SystemAdministrator => "SYSTEM_ADMINISTRATOR",
            Role::ServerObserver => "SERVER_OBSERVER",
        }
    }

    /// Exact, case-sensitive lookup by role name.
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.as_str() == name)
    }

    /// Parses a list of role names.
    ///
    /// Fails if the list is empty or contains an unknown name. Duplicates
    /// collapse.
    pub fn parse_all(names: &[String]) -> Result<BTreeSet<Role>, ApiKeyError> {
        if names.is_empty() {
            return Err(ApiKeyError::invalid_role("missing roles"));
        }
        names
            .iter()
            .map(|name| {
                Role::from_name(name)
                    .ok_or_else(|| ApiKeyError::invalid_role(format!("invalid role name {}", name)))
            })
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SHA-256 digest of a plaintext key, lowercase hex.
pub fn encode_key(plaintext: &str) -> String {
    Sha256::digest(plaintext.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// A stored API key. Only the digest of the key is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentApiKey {
    pub id: u64,
    pub encoded_key: String,
    pub roles: BTreeSet<Role>,
}

impl PersistentApiKey {
    pub fn role_list(&self) -> Vec<Role> {
        self.roles.iter().copied().collect()
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

/// A freshly created key, the only time the plaintext is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaintextApiKey {
    pub id: u64,
    pub key: String,
    pub roles: BTreeSet<Role>,
}

/// JSON representation of a key returned by the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicApiKeyData {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub roles: Vec<Role>,
}

impl From<PlaintextApiKey> for PublicApiKeyData {
    fn from(created: PlaintextApiKey) -> Self {
        PublicApiKeyData {
            id: created.id,
            key: Some(created.key),
            roles: created.roles.into_iter().collect(),
        }
    }
}

impl From<&PersistentApiKey> for PublicApiKeyData {
    fn from(stored: &PersistentApiKey) -> Self {
        PublicApiKeyData {
            id: stored.id,
            key: None,
            roles: stored.role_list(),
        }
    }
}
