// ============================================================================
// ROUTE GUARDS - decisiones puras (los componentes solo las ejecutan)
// ============================================================================

use crate::utils::{DASHBOARD_PATH, LOGIN_PATH};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navegación con replace: nunca añade entrada al historial
    Redirect { to: String, from: Option<String> },
}

/// Rutas protegidas: sin sesión se va al login recordando el destino
pub fn protected_route(is_authenticated: bool, location: &str) -> GuardDecision {
    if is_authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            to: LOGIN_PATH.to_string(),
            from: Some(location.to_string()),
        }
    }
}

/// Ruta de login: con sesión se vuelve al destino original o al dashboard
pub fn login_route(is_authenticated: bool, return_to: Option<&str>) -> GuardDecision {
    if !is_authenticated {
        return GuardDecision::Allow;
    }
    GuardDecision::Redirect {
        to: safe_return_path(return_to).to_string(),
        from: None,
    }
}

/// Solo rutas internas (`/algo`); nada de `//host`, URLs absolutas ni el
/// propio login
pub fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path != LOGIN_PATH
                && !path.starts_with("/login?") =>
        {
            path
        }
        _ => DASHBOARD_PATH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_route_redirects_anonymous_users_to_login() {
        assert_eq!(
            protected_route(false, "/orders"),
            GuardDecision::Redirect {
                to: "/login".into(),
                from: Some("/orders".into())
            }
        );
        assert_eq!(protected_route(true, "/orders"), GuardDecision::Allow);
    }

    #[test]
    fn protected_route_remembers_the_query_string() {
        assert_eq!(
            protected_route(false, "/orders?page=2"),
            GuardDecision::Redirect {
                to: "/login".into(),
                from: Some("/orders?page=2".into())
            }
        );
    }

    #[test]
    fn login_route_sends_authenticated_users_to_dashboard() {
        assert_eq!(
            login_route(true, None),
            GuardDecision::Redirect { to: "/".into(), from: None }
        );
        assert_eq!(login_route(false, Some("/orders")), GuardDecision::Allow);
    }

    #[test]
    fn login_route_returns_to_the_original_destination() {
        assert_eq!(
            login_route(true, Some("/products")),
            GuardDecision::Redirect { to: "/products".into(), from: None }
        );
    }

    #[test]
    fn unsafe_return_paths_fall_back_to_dashboard() {
        for bad in ["https://evil.test", "//evil.test", "/login", "orders", "/\\evil.test", "/login?next=/"] {
            assert_eq!(safe_return_path(Some(bad)), "/", "{bad}");
        }
        assert_eq!(safe_return_path(Some("/shops")), "/shops");
    }
}
