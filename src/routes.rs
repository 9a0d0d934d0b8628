// ============================================================================
// RUTAS - tabla de yew-router
// ============================================================================

use yew_router::prelude::*;

use crate::session::guard::safe_return_path;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/products")]
    Products,
    #[at("/products/:id/variants")]
    ProductVariants { id: String },
    #[at("/orders")]
    Orders,
    #[at("/customers")]
    Customers,
    #[at("/shops")]
    Shops,
    #[at("/categories")]
    Categories,
    #[at("/subcategories")]
    Subcategories,
    #[at("/payments")]
    Payments,
    #[at("/admins")]
    Admins,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Ruta interna a partir de un path ya validado; si no existe, dashboard
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        match Route::recognize(path) {
            Some(Route::NotFound) | None => Route::Dashboard,
            Some(route) => route,
        }
    }

    /// Entradas del menú lateral
    pub fn sidebar() -> &'static [(Route, &'static str)] {
        &[
            (Route::Dashboard, "Dashboard"),
            (Route::Products, "Products"),
            (Route::Orders, "Orders"),
            (Route::Customers, "Customers"),
            (Route::Shops, "Shops"),
            (Route::Categories, "Categories"),
            (Route::Subcategories, "Subcategories"),
            (Route::Payments, "Payments"),
            (Route::Admins, "Admins"),
            (Route::Settings, "Settings"),
        ]
    }
}

/// Estado de navegación: a dónde volver después del login (path y query ya
/// decodificada, para no perder p. ej. `?page=2`)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReturnTo {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ReturnTo {
    pub fn new(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self { path: path.into(), query }
    }

    pub fn from_location(location: &Location) -> Self {
        let query = match location.query::<Vec<(String, String)>>() {
            Ok(query) => query,
            Err(e) => {
                log::warn!("⚠️ Query no legible en {}: {}", location.path(), e);
                Vec::new()
            }
        };
        Self::new(location.path(), query)
    }

    /// Ruta y query a las que volver; un path no seguro va al dashboard sin
    /// query
    pub fn destination(return_to: Option<&ReturnTo>) -> (Route, Vec<(String, String)>) {
        let path = safe_return_path(return_to.map(|r| r.path.as_str()));
        let route = Route::from_path(path);
        match return_to {
            Some(r) if r.path == path => (route, r.query.clone()),
            _ => (route, Vec::new()),
        }
    }
}

/// `replace` hacia el destino guardado, con su query si la tenía
pub fn replace_to_destination(navigator: &Navigator, return_to: Option<&ReturnTo>) {
    let (route, query) = ReturnTo::destination(return_to);
    if query.is_empty() {
        navigator.replace(&route);
        return;
    }
    if let Err(e) = navigator.replace_with_query(&route, &query) {
        log::warn!("⚠️ No se pudo restaurar la query al volver: {}", e);
        navigator.replace(&route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(Route::from_path("/orders"), Route::Orders);
        assert_eq!(Route::from_path("/orders?page=2"), Route::Orders);
        assert_eq!(
            Route::from_path("/products/p1/variants"),
            Route::ProductVariants { id: "p1".into() }
        );
        assert_eq!(Route::from_path("/nowhere"), Route::Dashboard);
        assert_eq!(Route::Login.to_path(), "/login");
    }

    #[test]
    fn return_trip_keeps_the_query_string() {
        let from = ReturnTo::new("/orders", vec![("page".into(), "2".into()), ("q".into(), "a b".into())]);
        let (route, query) = ReturnTo::destination(Some(&from));
        assert_eq!(route, Route::Orders);
        assert_eq!(query, from.query);
    }

    #[test]
    fn unsafe_return_target_drops_its_query() {
        let from = ReturnTo::new("//evil.test", vec![("next".into(), "/".into())]);
        assert_eq!(ReturnTo::destination(Some(&from)), (Route::Dashboard, Vec::new()));
        assert_eq!(ReturnTo::destination(None), (Route::Dashboard, Vec::new()));
    }
}
