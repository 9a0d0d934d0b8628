// ============================================================================
// TOASTS - cola de notificaciones
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use super::reactivity::{Listeners, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

/// Máximo de toasts visibles; los más antiguos se descartan
const TOAST_LIMIT: usize = 3;

#[derive(Clone)]
pub struct ToastQueue {
    toasts: Rc<RefCell<Vec<Toast>>>,
    listeners: Rc<Listeners<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self {
            toasts: Rc::new(RefCell::new(Vec::new())),
            listeners: Rc::new(Listeners::new()),
        }
    }

    pub fn push(&self, title: impl Into<String>, description: Option<String>, variant: ToastVariant) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            variant,
        };
        let id = toast.id;
        {
            let mut toasts = self.toasts.borrow_mut();
            toasts.push(toast);
            let overflow = toasts.len().saturating_sub(TOAST_LIMIT);
            toasts.drain(..overflow);
        }
        self.notify();
        id
    }

    pub fn success(&self, title: impl Into<String>) -> Uuid {
        self.push(title, None, ToastVariant::Default)
    }

    pub fn error(&self, description: impl Into<String>) -> Uuid {
        self.push("Error", Some(description.into()), ToastVariant::Destructive)
    }

    pub fn dismiss(&self, id: Uuid) {
        let removed = {
            let mut toasts = self.toasts.borrow_mut();
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            before != toasts.len()
        };
        if removed {
            self.notify();
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<Toast>) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    fn notify(&self) {
        let snapshot = self.toasts();
        self.listeners.notify(&snapshot);
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ToastQueue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.toasts, &other.toasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn keeps_only_the_newest_toasts() {
        let queue = ToastQueue::new();
        for i in 0..5 {
            queue.success(format!("saved {i}"));
        }
        let titles: Vec<_> = queue.toasts().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["saved 2", "saved 3", "saved 4"]);
    }

    #[test]
    fn dismiss_notifies_only_when_something_changed() {
        let queue = ToastQueue::new();
        let notified = Rc::new(Cell::new(0));
        let _sub = {
            let notified = notified.clone();
            queue.subscribe(move |_| notified.set(notified.get() + 1))
        };

        let id = queue.error("boom");
        queue.dismiss(id);
        queue.dismiss(id);

        assert_eq!(notified.get(), 2);
        assert!(queue.toasts().is_empty());
    }

    #[test]
    fn errors_are_destructive() {
        let queue = ToastQueue::new();
        queue.error("Email already taken");
        let toast = &queue.toasts()[0];
        assert_eq!(toast.variant, ToastVariant::Destructive);
        assert_eq!(toast.description.as_deref(), Some("Email already taken"));
    }
}
