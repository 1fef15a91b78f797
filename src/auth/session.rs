use std::sync::Arc;

use tokio::sync::watch;

use crate::models::Principal;

/// The signed-in principal, shared explicitly with every component that needs
/// it. Clones observe the same session.
#[derive(Clone)]
pub struct Session {
    principal: Arc<watch::Sender<Option<Principal>>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            principal: Arc::new(tx),
        }
    }

    pub fn current(&self) -> Option<Principal> {
        self.principal.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.principal.borrow().is_some()
    }

    pub(crate) fn set_principal(&self, principal: Principal) {
        self.principal.send_replace(Some(principal));
    }

    pub fn sign_out(&self) {
        let previous = self.principal.send_replace(None);
        if let Some(principal) = previous {
            log::info!("User {} signed out", principal.user_id);
        }
    }

    /// Live view of principal changes. Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.principal.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.principal.receiver_count()
    }
}

pub struct SessionSubscription {
    rx: watch::Receiver<Option<Principal>>,
}

impl SessionSubscription {
    pub fn current(&self) -> Option<Principal> {
        self.rx.borrow().clone()
    }

    /// Waits for the next principal change. Returns `None` once the session
    /// itself has been dropped.
    pub async fn changed(&mut self) -> Option<Option<Principal>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> Principal {
        Principal {
            user_id: id.into(),
            email: format!("{id}@example.com"),
            display_name: Some(id.to_uppercase()),
        }
    }

    #[test]
    fn sign_out_clears_principal() {
        let session = Session::new();
        session.set_principal(principal("u1"));
        assert!(session.is_signed_in());

        session.sign_out();
        assert_eq!(session.current(), None);
    }

    #[tokio::test]
    async fn subscribers_see_principal_changes() {
        let session = Session::new();
        let mut sub = session.subscribe();
        assert_eq!(sub.current(), None);

        session.set_principal(principal("u1"));
        assert_eq!(sub.changed().await, Some(Some(principal("u1"))));

        session.sign_out();
        assert_eq!(sub.changed().await, Some(None));
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let session = Session::new();
        let sub = session.subscribe();
        assert_eq!(session.subscriber_count(), 1);
        drop(sub);
        assert_eq!(session.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscription_ends_with_session() {
        let session = Session::new();
        let mut sub = session.subscribe();
        drop(session);
        assert_eq!(sub.changed().await, None);
    }
}
