// Authentication gate
//
// A placeholder: there is no credential check. `login` always succeeds after
// an artificial delay and the only state is a persisted "authenticated" flag.
// Session start/end is broadcast through a watch channel.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use super::state::StateStore;

pub struct AuthGate {
    store: Arc<StateStore>,
    delay: Duration,
    session: watch::Sender<bool>,
}

impl AuthGate {
    pub fn new(store: Arc<StateStore>, delay: Duration) -> Self {
        let authenticated = store.snapshot().authenticated;
        let (session, _) = watch::channel(authenticated);
        Self {
            store,
            delay,
            session,
        }
    }

    /// Pretend to verify the credentials. Always succeeds.
    pub async fn login(&self, username: &str, _password: &str) -> bool {
        debug!(username, "Authenticating");
        tokio::time::sleep(self.delay).await;
        true
    }

    /// Mark the session as started and remember it for the next launch.
    pub fn complete_authentication(&self) {
        self.store.update(|s| s.authenticated = true);
        self.session.send_replace(true);
        info!("Session started");
    }

    pub fn logout(&self) {
        self.store.update(|s| s.authenticated = false);
        self.session.send_replace(false);
        info!("Session ended");
    }

    pub fn is_authenticated(&self) -> bool {
        *self.session.borrow()
    }

    /// Receiver that observes session start (`true`) and end (`false`).
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_login_always_succeeds_after_delay() {
        let gate = AuthGate::new(Arc::new(StateStore::in_memory()), Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        assert!(gate.login("neo", "anything").await);
        assert!(start.elapsed() >= Duration::from_secs(2));
        // login alone does not start the session
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_session_signal() {
        let gate = AuthGate::new(Arc::new(StateStore::in_memory()), Duration::ZERO);
        let mut rx = gate.subscribe();

        gate.complete_authentication();
        rx.changed().await.unwrap();
        assert!(*rx.borrow());

        gate.logout();
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_flag_is_restored_from_store() {
        let store = Arc::new(StateStore::in_memory());
        store.update(|s| s.authenticated = true);
        let gate = AuthGate::new(store, Duration::ZERO);
        assert!(gate.is_authenticated());
    }
}
