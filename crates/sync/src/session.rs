//! Persisted session state: the active submission token per shop.
//!
//! Both the submission flow (save on upload) and the recovery flow (load on
//! cold start, clear on failure) go through the [`SessionStore`] interface
//! rather than touching storage ambiently. The file-backed store keeps one
//! file per shop named after the `uploadToken_{shopId}` key; writes are
//! last-writer-wins with no locking, so two client processes for the same
//! shop overwrite each other's token.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use printdesk_core::types::{ShopId, Token};

/// Storage key for a shop's active token.
pub fn storage_key(shop_id: &ShopId) -> String {
    format!("uploadToken_{shop_id}")
}

/// Errors from the durable store.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable, shop-keyed storage for the active submission token.
///
/// At most one token is held per shop: `save` overwrites, `clear` removes.
pub trait SessionStore: Send + Sync {
    /// The stored token for a shop, if any.
    fn load(&self, shop_id: &ShopId) -> Option<Token>;

    /// Persist the active token for a shop, replacing any previous one.
    fn save(&self, shop_id: &ShopId, token: &Token) -> Result<(), SessionStoreError>;

    /// Drop the stored token for a shop. Clearing an absent key is a no-op.
    fn clear(&self, shop_id: &ShopId);
}

/// File-backed store: one small file per key under a data directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, shop_id: &ShopId) -> PathBuf {
        self.dir.join(storage_key(shop_id))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, shop_id: &ShopId) -> Option<Token> {
        let text = std::fs::read_to_string(self.path_for(shop_id)).ok()?;
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Token(text.to_string()))
        }
    }

    fn save(&self, shop_id: &ShopId, token: &Token) -> Result<(), SessionStoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(shop_id), token.as_str())?;
        Ok(())
    }

    fn clear(&self, shop_id: &ShopId) {
        // A missing file is the desired end state either way.
        let _ = std::fs::remove_file(self.path_for(shop_id));
    }
}

/// In-memory store for tests and ephemeral embedders.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, shop_id: &ShopId) -> Option<Token> {
        self.entries
            .lock()
            .expect("session store poisoned")
            .get(&storage_key(shop_id))
            .map(|t| Token(t.clone()))
    }

    fn save(&self, shop_id: &ShopId, token: &Token) -> Result<(), SessionStoreError> {
        self.entries
            .lock()
            .expect("session store poisoned")
            .insert(storage_key(shop_id), token.as_str().to_string());
        Ok(())
    }

    fn clear(&self, shop_id: &ShopId) {
        self.entries
            .lock()
            .expect("session store poisoned")
            .remove(&storage_key(shop_id));
    }
}
