use std::cell::RefCell;
use std::rc::Rc;

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "access_token";
const TOKEN_EXPIRY_KEY: &str = "token_expiry";

/// Bearer token together with its absolute expiry (epoch millis)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub access_token: String,
    pub expiry_ms: Option<i64>,
}

impl StoredToken {
    /// A token without a known expiry counts as expired.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        match self.expiry_ms {
            Some(expiry) => now_ms >= expiry,
            None => true,
        }
    }
}

pub trait TokenStore {
    fn load(&self) -> Option<StoredToken>;
    fn save(&self, token: &StoredToken);
    fn clear(&self);
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Token persisted in `localStorage` so it survives page reloads
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<StoredToken> {
        let storage = get_local_storage()?;
        let access_token = storage.get_item(ACCESS_TOKEN_KEY).ok()??;
        let expiry_ms = storage
            .get_item(TOKEN_EXPIRY_KEY)
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok());
        Some(StoredToken {
            access_token,
            expiry_ms,
        })
    }

    fn save(&self, token: &StoredToken) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(ACCESS_TOKEN_KEY, &token.access_token);
            match token.expiry_ms {
                Some(expiry) => {
                    let _ = storage.set_item(TOKEN_EXPIRY_KEY, &expiry.to_string());
                }
                None => {
                    let _ = storage.remove_item(TOKEN_EXPIRY_KEY);
                }
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
            let _ = storage.remove_item(TOKEN_EXPIRY_KEY);
        }
    }
}

/// Token kept only for the lifetime of the page
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<StoredToken>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: StoredToken) -> Self {
        Self {
            token: RefCell::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredToken> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &StoredToken) {
        *self.token.borrow_mut() = Some(token.clone());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// `localStorage` when the browser offers it, memory otherwise.
pub fn default_store() -> Rc<dyn TokenStore> {
    if get_local_storage().is_some() {
        Rc::new(LocalStorageTokenStore)
    } else {
        log::warn!("localStorage unavailable, keeping token in memory");
        Rc::new(MemoryTokenStore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let token = StoredToken {
            access_token: "t".into(),
            expiry_ms: Some(1_000),
        };
        assert!(!token.is_expired(999));
        assert!(token.is_expired(1_000));

        let no_expiry = StoredToken {
            access_token: "t".into(),
            expiry_ms: None,
        };
        assert!(no_expiry.is_expired(0));
    }

    #[test]
    fn test_memory_store_roundtrip_and_clear() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);
        let token = StoredToken {
            access_token: "abc".into(),
            expiry_ms: Some(5),
        };
        store.save(&token);
        assert_eq!(store.load(), Some(token));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
