// ============================================================================
// ADMIN LAYOUT - menú lateral, cabecera con usuario y logout
// ============================================================================

use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::{use_auth, use_current_user};
use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct AdminLayoutProps {
    pub children: Children,
}

#[function_component(AdminLayout)]
pub fn admin_layout(props: &AdminLayoutProps) -> Html {
    let auth = use_auth();
    let current_route = use_route::<Route>();
    // Mantiene fresco el usuario de la sesión
    let _me = use_current_user();

    let user = auth.session.user().cloned();
    let can_manage_admins = user.as_ref().is_some_and(|u| u.role.can_manage_admins());
    let on_logout = auth.logout.reform(|_: MouseEvent| ());

    html! {
        <div class="admin-layout">
            <aside class="sidebar">
                <div class="sidebar-brand">{"🛒 Shop Admin"}</div>
                <nav>
                    { for Route::sidebar()
                        .iter()
                        .filter(|(route, _)| *route != Route::Admins || can_manage_admins)
                        .map(|(route, label)| {
                            let class = if current_route.as_ref() == Some(route) { "nav-link active" } else { "nav-link" };
                            html! {
                                <Link<Route> to={route.clone()} classes={classes!(class)}>{*label}</Link<Route>>
                            }
                        })
                    }
                </nav>
            </aside>
            <div class="admin-main">
                <header class="admin-header">
                    if let Some(user) = user {
                        <div class="header-user">
                            <span class="user-name">{user.name.clone()}</span>
                            <span class="user-role">{user.role.label()}</span>
                        </div>
                    }
                    <button class="btn-logout" onclick={on_logout}>{"Log out"}</button>
                </header>
                <main class="admin-content">
                    {props.children.clone()}
                </main>
            </div>
        </div>
    }
}
