// ============================================================================
// CANCEL TOKEN - cancelación explícita de peticiones
// ============================================================================
// Envuelve un AbortController. Los hooks crean un token por petición y lo
// cancelan al desmontar el componente; fetch se aborta de verdad.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use web_sys::AbortSignal;

#[derive(Default)]
struct Inner {
    controller: Option<web_sys::AbortController>,
    cancelled: Cell<bool>,
    /// Tokens hijos que se cancelan con este
    children: RefCell<Vec<Weak<Inner>>>,
}

#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Rc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                controller: new_controller(),
                ..Inner::default()
            }),
        }
    }

    /// Token sin AbortController (peticiones que no se cancelan)
    pub fn none() -> Self {
        Self::default()
    }

    /// Token propio (con su AbortController) que se cancela cuando se cancela
    /// este; cancelar el hijo no afecta al padre
    pub fn child(&self) -> CancelToken {
        let child = CancelToken::new();
        if self.is_cancelled() {
            child.cancel();
            return child;
        }
        let mut children = self.inner.children.borrow_mut();
        children.retain(|weak| weak.strong_count() > 0);
        children.push(Rc::downgrade(&child.inner));
        child
    }

    pub fn signal(&self) -> Option<AbortSignal> {
        self.inner.controller.as_ref().map(|c| c.signal())
    }

    pub fn cancel(&self) {
        cancel_inner(&self.inner);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }
}

fn cancel_inner(inner: &Inner) {
    if inner.cancelled.replace(true) {
        return;
    }
    if let Some(controller) = &inner.controller {
        controller.abort();
    }
    let children = inner.children.take();
    for child in children.iter().filter_map(Weak::upgrade) {
        cancel_inner(&child);
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(target_arch = "wasm32")]
fn new_controller() -> Option<web_sys::AbortController> {
    match web_sys::AbortController::new() {
        Ok(controller) => Some(controller),
        Err(e) => {
            log::warn!("⚠️ AbortController no disponible: {:?}", e);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn new_controller() -> Option<web_sys::AbortController> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_sticky_and_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(token == clone);
        assert!(token != CancelToken::new());
    }

    #[test]
    fn cancelling_the_caller_cancels_its_requests() {
        let caller = CancelToken::none();
        let request = caller.child();
        let finished = caller.child();
        drop(finished);

        caller.cancel();

        assert!(request.is_cancelled());
        assert!(caller.child().is_cancelled());
    }

    #[test]
    fn timing_out_a_request_leaves_the_caller_alive() {
        let caller = CancelToken::new();
        let request = caller.child();

        request.cancel();

        assert!(request.is_cancelled());
        assert!(!caller.is_cancelled());
        assert!(!caller.child().is_cancelled());
    }
}
