use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use uuid::Uuid;

use crate::domain::common::CoreError;

type SessionMap = Mutex<HashMap<Uuid, Arc<SessionScans>>>;

/// Hands out per-session scan tickets. A newer ticket, or a cancel, makes
/// older tickets stale so their late results can be dropped. A session is
/// tracked only while one of its tickets is alive.
#[derive(Debug, Default)]
pub struct ScanTracker {
    sessions: Arc<SessionMap>,
}

#[derive(Debug, Default)]
struct SessionScans {
    generation: AtomicU64,
    in_flight: AtomicU64,
}

#[derive(Debug)]
pub struct ScanTicket {
    session_id: Uuid,
    generation: u64,
    scans: Arc<SessionScans>,
    registry: Weak<SessionMap>,
}

fn lock(sessions: &SessionMap) -> MutexGuard<'_, HashMap<Uuid, Arc<SessionScans>>> {
    sessions.lock().unwrap_or_else(|e| e.into_inner())
}

impl ScanTracker {
    pub fn begin(&self, session_id: Uuid) -> ScanTicket {
        let mut sessions = lock(&self.sessions);
        let scans = Arc::clone(sessions.entry(session_id).or_default());
        let generation = scans.generation.fetch_add(1, Ordering::SeqCst) + 1;
        scans.in_flight.fetch_add(1, Ordering::SeqCst);

        ScanTicket {
            session_id,
            generation,
            scans,
            registry: Arc::downgrade(&self.sessions),
        }
    }

    /// Returns `true` when a scan was in flight for the session.
    pub fn cancel(&self, session_id: Uuid) -> bool {
        let sessions = lock(&self.sessions);
        match sessions.get(&session_id) {
            Some(scans) => {
                scans.generation.fetch_add(1, Ordering::SeqCst);
                scans.in_flight.load(Ordering::SeqCst) > 0
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn tracked_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }
}

impl ScanTicket {
    pub fn is_current(&self) -> bool {
        self.scans.generation.load(Ordering::SeqCst) == self.generation
    }

    pub fn ensure_current(&self) -> Result<(), CoreError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(CoreError::ScanCancelled)
        }
    }
}

impl Drop for ScanTicket {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            self.scans.in_flight.fetch_sub(1, Ordering::SeqCst);
            return;
        };

        let mut sessions = lock(&registry);
        if self.scans.in_flight.fetch_sub(1, Ordering::SeqCst) == 1
            && sessions
                .get(&self.session_id)
                .is_some_and(|scans| Arc::ptr_eq(scans, &self.scans))
        {
            sessions.remove(&self.session_id);
        }
    }
}
