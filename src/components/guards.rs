// ============================================================================
// GUARDS - ejecutan las decisiones de session::guard con yew-router
// ============================================================================
// Siempre `replace`: la ruta bloqueada no queda en el historial.
// ============================================================================

use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_session;
use crate::routes::{replace_to_destination, ReturnTo, Route};
use crate::session::guard::{self, GuardDecision};

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub children: Children,
}

/// Rutas con sesión
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &GuardProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();

    let (path, return_to) = match &location {
        Some(l) => (format!("{}{}", l.path(), l.query_str()), Some(ReturnTo::from_location(l))),
        None => (String::new(), None),
    };
    let decision = guard::protected_route(session.is_authenticated(), &path);

    {
        let decision = decision.clone();
        use_effect_with(decision, move |decision| {
            if let (GuardDecision::Redirect { from, .. }, Some(navigator)) = (decision, navigator) {
                log::info!("🔒 Sin sesión, redirigiendo al login desde {:?}", from);
                match return_to {
                    Some(return_to) => navigator.replace_with_state(&Route::Login, return_to),
                    None => navigator.replace(&Route::Login),
                }
            }
        });
    }

    match decision {
        GuardDecision::Allow => html! { <>{props.children.clone()}</> },
        GuardDecision::Redirect { .. } => Html::default(),
    }
}

/// Ruta de login: con sesión se vuelve al destino original
#[function_component(RedirectIfAuthenticated)]
pub fn redirect_if_authenticated(props: &GuardProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();

    let return_to = location
        .and_then(|l| l.state::<ReturnTo>())
        .map(|state| (*state).clone());
    let decision = guard::login_route(
        session.is_authenticated(),
        return_to.as_ref().map(|r| r.path.as_str()),
    );

    {
        let decision = decision.clone();
        use_effect_with(decision, move |decision| {
            if let (GuardDecision::Redirect { .. }, Some(navigator)) = (decision, navigator) {
                replace_to_destination(&navigator, return_to.as_ref());
            }
        });
    }

    match decision {
        GuardDecision::Allow => html! { <>{props.children.clone()}</> },
        GuardDecision::Redirect { .. } => Html::default(),
    }
}
