use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("credential store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Holds the single session token.
///
/// `get` never fails: an unreachable store reads as "no token", which callers treat the same
/// as being logged out.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self) -> Option<String>;
    async fn set(&self, token: &str) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// OS credential store (Keychain, Credential Manager, kernel keyutils).
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: Arc<str>,
    key: Arc<str>,
}

impl KeyringTokenStore {
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self { service: Arc::from(service.into()), key: Arc::from(key.into()) }
    }

    async fn with_entry<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(keyring::Entry) -> keyring::Result<T> + Send + 'static,
    {
        let service = self.service.clone();
        let key = self.key.clone();
        let result = tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(&service, &key)?;
            f(entry)
        })
        .await?;
        Ok(result?)
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn get(&self) -> Option<String> {
        match self.with_entry(|entry| entry.get_password()).await {
            Ok(token) => Some(token),
            Err(StoreError::Keyring(keyring::Error::NoEntry)) => None,
            Err(err) => {
                tracing::warn!("session token unavailable: {}", err);
                None
            }
        }
    }

    async fn set(&self, token: &str) -> Result<(), StoreError> {
        let token = token.to_string();
        self.with_entry(move |entry| entry.set_password(&token)).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match self.with_entry(|entry| entry.delete_credential()).await {
            Err(StoreError::Keyring(keyring::Error::NoEntry)) => Ok(()),
            other => other,
        }
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Option<String> {
        match self.token.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => {
                tracing::warn!("session token unavailable: poisoned lock");
                None
            }
        }
    }

    async fn set(&self, token: &str) -> Result<(), StoreError> {
        let mut guard = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
        Ok(())
    }
}
