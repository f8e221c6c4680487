//! Cookie-keyed in-memory session store. Nothing survives a restart.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::Response,
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::assess::session::SessionState;

pub const SESSION_COOKIE: &str = "phrs_session";

const DEFAULT_MAX_SESSIONS: usize = 10_000;
const DEFAULT_IDLE: Duration = Duration::from_secs(60 * 60);

struct Slot {
    state: Arc<Mutex<SessionState>>,
    last_seen: Instant,
}

/// Sessions are only created by form posts. Idle ones expire, and the oldest
/// is dropped once `max_sessions` is reached.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Slot>>>,
    max_sessions: usize,
    idle: Duration,
}

/// A resolved session plus whether the browser still needs its cookie.
pub struct SessionHandle {
    pub id: Uuid,
    pub state: Arc<Mutex<SessionState>>,
    pub fresh: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_IDLE)
    }
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle: Duration) -> Self {
        Self {
            inner: Arc::default(),
            max_sessions: max_sessions.max(1),
            idle,
        }
    }

    /// Find the session named by the request cookie without creating one.
    pub async fn lookup(&self, headers: &HeaderMap) -> Option<SessionHandle> {
        let id = session_id(headers)?;
        let mut sessions = self.inner.lock().await;
        let slot = sessions.get_mut(&id)?;
        if slot.last_seen.elapsed() >= self.idle {
            sessions.remove(&id);
            return None;
        }
        slot.last_seen = Instant::now();
        Some(SessionHandle {
            id,
            state: slot.state.clone(),
            fresh: false,
        })
    }

    /// Look up the session named by the request cookie, creating one when absent.
    pub async fn resolve(&self, headers: &HeaderMap) -> SessionHandle {
        if let Some(handle) = self.lookup(headers).await {
            return handle;
        }
        let id = Uuid::new_v4();
        let state = Arc::new(Mutex::new(SessionState::new()));
        let mut sessions = self.inner.lock().await;
        self.evict(&mut sessions);
        sessions.insert(
            id,
            Slot {
                state: state.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!(%id, live = sessions.len(), "created session");
        SessionHandle {
            id,
            state,
            fresh: true,
        }
    }

    fn evict(&self, sessions: &mut HashMap<Uuid, Slot>) {
        let idle = self.idle;
        sessions.retain(|_, slot| slot.last_seen.elapsed() < idle);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, slot)| slot.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!(id = %oldest, "evicted session");
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl SessionHandle {
    /// Attach the session cookie to `resp` when the browser does not have it yet.
    pub fn attach(&self, mut resp: Response) -> Response {
        if self.fresh {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                resp.headers_mut().append(SET_COOKIE, value);
            }
        }
        resp
    }
}

fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_cookie_gets_a_fresh_session() {
        let store = SessionStore::default();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; phrs_session=not-a-uuid"),
        );
        let handle = store.resolve(&headers).await;
        assert!(handle.fresh);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn known_cookie_resolves_same_session() {
        let store = SessionStore::default();
        let first = store.resolve(&HeaderMap::new()).await;
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("a=b; {SESSION_COOKIE}={}", first.id)).unwrap(),
        );
        let second = store.resolve(&headers).await;
        assert!(!second.fresh);
        assert_eq!(first.id, second.id);
        assert!(Arc::ptr_eq(&first.state, &second.state));
    }

    fn cookie_for(id: Uuid) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={id}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn lookup_never_creates_sessions() {
        let store = SessionStore::default();
        for _ in 0..50 {
            assert!(store.lookup(&HeaderMap::new()).await.is_none());
        }
        assert!(store.lookup(&cookie_for(Uuid::new_v4())).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn oldest_session_is_dropped_at_capacity() {
        let store = SessionStore::new(2, Duration::from_secs(3600));
        let first = store.resolve(&HeaderMap::new()).await;
        let second = store.resolve(&HeaderMap::new()).await;
        let third = store.resolve(&HeaderMap::new()).await;
        assert_eq!(store.len().await, 2);
        assert!(store.lookup(&cookie_for(first.id)).await.is_none());
        assert!(store.lookup(&cookie_for(second.id)).await.is_some());
        assert!(store.lookup(&cookie_for(third.id)).await.is_some());
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = SessionStore::new(100, Duration::ZERO);
        let first = store.resolve(&HeaderMap::new()).await;
        assert!(store.lookup(&cookie_for(first.id)).await.is_none());
        store.resolve(&HeaderMap::new()).await;
        store.resolve(&HeaderMap::new()).await;
        assert_eq!(store.len().await, 1);
    }
}
