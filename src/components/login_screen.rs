use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::{use_auth, LoginForm};

#[function_component(LoginScreen)]
pub fn login_screen() -> Html {
    let auth = use_auth();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let remember_ref = use_node_ref();

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let remember_ref = remember_ref.clone();
        let on_login = auth.login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let (Some(email_input), Some(password_input), Some(remember_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
                remember_ref.cast::<HtmlInputElement>(),
            ) {
                on_login.emit(LoginForm {
                    email: email_input.value(),
                    password: password_input.value(),
                    remember: remember_input.checked(),
                });
            }
        })
    };

    let email_error = auth.field_errors.get("email").map(str::to_string);
    let password_error = auth.field_errors.get("password").map(str::to_string);

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <div class="login-logo">
                        <div class="logo-icon">{"🛒"}</div>
                    </div>
                    <h1>{"Shop Admin"}</h1>
                    <p>{"Sign in to manage your store"}</p>
                </div>

                <form class="login-form" onsubmit={on_submit} novalidate=true>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="admin@example.com"
                            autocomplete="username"
                            value={auth.remembered.email.clone()}
                            ref={email_ref}
                        />
                        if let Some(message) = email_error {
                            <p class="field-error">{message}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            ref={password_ref}
                        />
                        if let Some(message) = password_error {
                            <p class="field-error">{message}</p>
                        }
                    </div>

                    <label class="remember-me">
                        <input
                            type="checkbox"
                            name="remember"
                            checked={auth.remembered.remember}
                            ref={remember_ref}
                        />
                        <span>{"Remember me"}</span>
                    </label>

                    <button type="submit" class="btn-login" disabled={auth.submitting}>
                        <span class="btn-text">
                            { if auth.submitting { "Signing in…" } else { "Sign in" } }
                        </span>
                    </button>
                </form>
            </div>
        </div>
    }
}
