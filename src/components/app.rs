use yew::prelude::*;
use yew_router::prelude::*;

use super::error_boundary::ErrorBoundary;
use super::guards::{ProtectedRoute, RedirectIfAuthenticated};
use super::layout::AdminLayout;
use super::login_screen::LoginScreen;
use super::pages::*;
use super::toaster::Toaster;
use crate::hooks::{use_app_context, AppContextProvider};
use crate::routes::{ReturnTo, Route};
use crate::session::flows;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <AppContextProvider>
            <BrowserRouter>
                <SessionExpiryWatcher />
                <Toaster />
                <ErrorBoundary>
                    <Switch<Route> render={switch} />
                </ErrorBoundary>
            </BrowserRouter>
        </AppContextProvider>
    }
}

/// Único consumidor de la señal de sesión expirada: cierra la sesión local,
/// vacía la caché y vuelve al login sin dejar entrada en el historial
#[function_component(SessionExpiryWatcher)]
fn session_expiry_watcher() -> Html {
    let context = use_app_context();
    let navigator = use_navigator();
    let location = use_location();

    // Página actual, para volver a ella tras el nuevo login
    let current = use_mut_ref(|| None::<ReturnTo>);
    *current.borrow_mut() = location
        .as_ref()
        .filter(|l| l.path() != Route::Login.to_path())
        .map(ReturnTo::from_location);

    use_effect_with(context, move |context| {
        let (session, queries) = (context.session.clone(), context.queries.clone());
        let subscription = context.signal.subscribe(move |_| {
            flows::expire_session(&session, &queries);
            let return_to = current.borrow().clone();
            match (&navigator, return_to) {
                (Some(navigator), Some(return_to)) => navigator.replace_with_state(&Route::Login, return_to),
                (Some(navigator), None) => navigator.replace(&Route::Login),
                (None, _) => log::error!("❌ Sesión expirada sin router"),
            }
        });
        move || drop(subscription)
    });

    Html::default()
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! {
            <RedirectIfAuthenticated>
                <LoginScreen />
            </RedirectIfAuthenticated>
        },
        route => html! {
            <ProtectedRoute>
                <AdminLayout>
                    {protected_page(route)}
                </AdminLayout>
            </ProtectedRoute>
        },
    }
}

fn protected_page(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Products => html! { <ProductsPage /> },
        Route::ProductVariants { id } => html! { <VariantsPage product_id={id} /> },
        Route::Orders => html! { <OrdersPage /> },
        Route::Customers => html! { <CustomersPage /> },
        Route::Shops => html! { <ShopsPage /> },
        Route::Categories => html! { <CategoriesPage /> },
        Route::Subcategories => html! { <SubcategoriesPage /> },
        Route::Payments => html! { <PaymentsPage /> },
        Route::Admins => html! { <AdminsPage /> },
        Route::Settings => html! { <SettingsPage /> },
        Route::NotFound | Route::Login => html! { <NotFoundPage /> },
    }
}
