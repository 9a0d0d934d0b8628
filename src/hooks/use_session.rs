// ============================================================================
// USE SESSION HOOK - suscripción al SessionStore del contexto
// ============================================================================

use yew::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::session::Session;

/// Sesión actual; el componente se vuelve a renderizar en cada cambio
#[hook]
pub fn use_session() -> Session {
    let context = use_app_context();
    let session = use_state(|| context.session.snapshot());

    {
        let session = session.clone();
        use_effect_with(context.session.clone(), move |store| {
            // Puede haber cambiado entre el render y el efecto
            session.set(store.snapshot());
            let subscription = store.subscribe(move |next| session.set(next.clone()));
            move || drop(subscription)
        });
    }

    (*session).clone()
}
