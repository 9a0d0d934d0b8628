// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================
// Base común del store de sesión, la señal de expiración, la caché de
// consultas y la cola de toasts. Un hilo (WASM): Rc + RefCell.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T: ?Sized> {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(u64, Callback<T>)>>,
}

/// Lista de subscribers de eventos `T`
pub struct Listeners<T: ?Sized> {
    registry: Rc<Registry<T>>,
}

impl<T: ?Sized + 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                callbacks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Suscribirse a cambios; se da de baja al soltar la `Subscription`
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .callbacks
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let registry: Weak<Registry<T>> = Rc::downgrade(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.callbacks.borrow_mut().retain(|(cb_id, _)| *cb_id != id);
                }
            })),
        }
    }

    /// Notificar a todos los subscribers.
    /// Se copia la lista antes de llamar: un callback puede suscribir o
    /// darse de baja sin provocar un doble préstamo.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .registry
            .callbacks
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized + 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Alta activa en un `Listeners`
#[must_use = "la suscripción se cancela al soltarla"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Mantener la suscripción durante toda la vida de la app
    pub fn detach(mut self) {
        self.unsubscribe.take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_the_subscription_unsubscribes() {
        let listeners: Listeners<u32> = Listeners::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sub = {
            let seen = seen.clone();
            listeners.subscribe(move |v| seen.borrow_mut().push(*v))
        };
        listeners.notify(&1);
        drop(sub);
        listeners.notify(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(listeners.is_empty());
    }

    #[test]
    fn detached_subscriptions_stay_alive() {
        let listeners: Listeners<u32> = Listeners::new();
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            listeners.subscribe(move |_| count.set(count.get() + 1)).detach();
        }
        listeners.notify(&0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn callbacks_may_subscribe_during_notify() {
        let listeners: Rc<Listeners<u32>> = Rc::new(Listeners::new());
        let inner = listeners.clone();
        listeners
            .subscribe(move |_| inner.subscribe(|_| {}).detach())
            .detach();
        listeners.notify(&0);
        assert_eq!(listeners.len(), 2);
    }
}
