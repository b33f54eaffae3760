use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::models::EditingSession;

/// A registered session; the mutex serializes gestures on one form.
///
/// The slot is emptied when the form is closed, so a gesture that was
/// waiting on the lock finds `None` instead of stale state.
pub type SharedSession = Arc<Mutex<Option<EditingSession>>>;

/// Open editing sessions keyed by id
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, session: EditingSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Some(session))));
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove a session from the registry, taking its state.
    ///
    /// Waits for any gesture still holding the session's lock, and yields
    /// `None` if that gesture closed the session first.
    pub async fn close(&self, id: &Uuid) -> Option<EditingSession> {
        let shared = self.sessions.write().await.remove(id)?;
        let mut slot = shared.lock().await;
        slot.take()
    }

    /// Drop the entry of a session whose state was already taken under its lock
    pub async fn discard(&self, id: &Uuid) {
        self.sessions.write().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
