// ============================================================================
// SESSION SIGNAL - "la sesión ha expirado"
// ============================================================================
// Único canal para el 401: consultas, mutaciones y el error boundary publican
// aquí; un solo subscriber (SessionExpiryWatcher) hace logout + redirección.
// Tras publicar queda desarmada hasta el siguiente login, de modo que una
// ráfaga de 401 produce un único logout.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::state::{Listeners, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Expired,
}

#[derive(Clone)]
pub struct SessionSignal {
    armed: Rc<Cell<bool>>,
    listeners: Rc<Listeners<SessionEvent>>,
}

impl SessionSignal {
    pub fn new() -> Self {
        Self {
            armed: Rc::new(Cell::new(true)),
            listeners: Rc::new(Listeners::new()),
        }
    }

    /// Devuelve `true` si el evento se entregó, `false` si ya se había
    /// publicado desde el último login
    pub fn publish_expired(&self) -> bool {
        if !self.armed.replace(false) {
            log::debug!("Sesión ya marcada como expirada, se ignora");
            return false;
        }
        log::warn!("🔒 Sesión expirada o inválida (401)");
        self.listeners.notify(&SessionEvent::Expired);
        true
    }

    /// Volver a aceptar expiraciones (tras un login correcto)
    pub fn rearm(&self) {
        self.armed.set(true);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }
}

impl Default for SessionSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SessionSignal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.armed, &other.armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_once_until_rearmed() {
        let signal = SessionSignal::new();
        let count = Rc::new(Cell::new(0));
        let _sub = {
            let count = count.clone();
            signal.subscribe(move |_| count.set(count.get() + 1))
        };

        assert!(signal.publish_expired());
        assert!(!signal.publish_expired());
        assert_eq!(count.get(), 1);

        signal.rearm();
        assert!(signal.publish_expired());
        assert_eq!(count.get(), 2);
    }
}
