//! In-process token store.

use std::sync::{Arc, RwLock};

use crate::session::{
    domain::{Persistence, StoredSession},
    ports::{TokenStore, TokenStoreError},
};

/// Keeps remembered and session-only sessions in separate slots.
///
/// Saving into one slot empties the other, so at most one session exists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    slots: Arc<RwLock<Slots>>,
}

#[derive(Debug, Default)]
struct Slots {
    remembered: Option<StoredSession>,
    session_only: Option<StoredSession>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the current session is remembered.
    #[must_use]
    pub fn is_remembered(&self) -> bool {
        self.slots
            .read()
            .is_ok_and(|slots| slots.remembered.is_some())
    }
}

fn lock_error(err: impl ToString) -> TokenStoreError {
    TokenStoreError(err.to_string())
}

impl TokenStore for InMemoryTokenStore {
    fn save(&self, session: StoredSession, persistence: Persistence) -> Result<(), TokenStoreError> {
        let mut slots = self.slots.write().map_err(lock_error)?;
        match persistence {
            Persistence::Remember => {
                slots.remembered = Some(session);
                slots.session_only = None;
            }
            Persistence::SessionOnly => {
                slots.session_only = Some(session);
                slots.remembered = None;
            }
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>, TokenStoreError> {
        let slots = self.slots.read().map_err(lock_error)?;
        Ok(slots
            .remembered
            .clone()
            .or_else(|| slots.session_only.clone()))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut slots = self.slots.write().map_err(lock_error)?;
        slots.remembered = None;
        slots.session_only = None;
        Ok(())
    }
}
