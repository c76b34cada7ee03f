//! Key management service contract and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use super::error::ApiKeyError;
use super::key::{encode_key, PersistentApiKey, PlaintextApiKey, Role};

const KEY_LENGTH: usize = 32;

/// Key management operations consumed by the REST controller.
///
/// Implement this trait to back API keys with a real store (database,
/// external service). Role names arrive unparsed from the request body; the
/// service is responsible for rejecting unknown names.
pub trait ApiKeyService: Send + Sync {
    /// Creates a key with the given roles and returns its plaintext once.
    fn create(&self, role_names: &[String]) -> Result<PlaintextApiKey, ApiKeyError>;

    /// Replaces the roles of an existing key.
    fn update(&self, id: u64, role_names: &[String]) -> Result<PersistentApiKey, ApiKeyError>;

    fn get(&self, id: u64) -> Result<PersistentApiKey, ApiKeyError>;

    /// All keys, ordered by id.
    fn list(&self) -> Vec<PersistentApiKey>;

    /// Revokes a key.
    fn remove(&self, id: u64) -> Result<(), ApiKeyError>;

    /// Resolves a presented plaintext key.
    fn find_by_plaintext(&self, plaintext: &str) -> Option<PersistentApiKey>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    keys: BTreeMap<u64, PersistentApiKey>,
}

/// In-memory implementation of [`ApiKeyService`].
///
/// Useful for development, testing, and the demo server.
#[derive(Debug, Default)]
pub struct InMemoryApiKeyService {
    store: RwLock<Store>,
}

impl InMemoryApiKeyService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read(|store| store.keys.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

fn generate_key() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect()
}

impl ApiKeyService for InMemoryApiKeyService {
    fn create(&self, role_names: &[String]) -> Result<PlaintextApiKey, ApiKeyError> {
        let roles = Role::parse_all(role_names)?;
        let plaintext = generate_key();
        let encoded_key = encode_key(&plaintext);

        let id = self.write(|store| {
            store.next_id += 1;
            let id = store.next_id;
            store.keys.insert(
                id,
                PersistentApiKey {
                    id,
                    encoded_key,
                    roles: roles.clone(),
                },
            );
            id
        });

        tracing::debug!(id, "api key created");
        Ok(PlaintextApiKey {
            id,
            key: plaintext,
            roles,
        })
    }

    fn update(&self, id: u64, role_names: &[String]) -> Result<PersistentApiKey, ApiKeyError> {
        self.write(|store| {
            let key = store.keys.get_mut(&id).ok_or_else(|| ApiKeyError::not_found(id))?;
            key.roles = Role::parse_all(role_names)?;
            Ok(key.clone())
        })
    }

    fn get(&self, id: u64) -> Result<PersistentApiKey, ApiKeyError> {
        self.read(|store| store.keys.get(&id).cloned())
            .ok_or_else(|| ApiKeyError::not_found(id))
    }

    fn list(&self) -> Vec<PersistentApiKey> {
        self.read(|store| store.keys.values().cloned().collect())
    }

    fn remove(&self, id: u64) -> Result<(), ApiKeyError> {
        self.write(|store| store.keys.remove(&id))
            .map(|_| tracing::debug!(id, "api key revoked"))
            .ok_or_else(|| ApiKeyError::not_found(id))
    }

    fn find_by_plaintext(&self, plaintext: &str) -> Option<PersistentApiKey> {
        let encoded = encode_key(plaintext);
        self.read(|store| {
            store
                .keys
                .values()
                .find(|key| key.encoded_key == encoded)
                .cloned()
        })
    }
}
