// ============================================================================
// ERROR BOUNDARY - pantalla de error para fallos no recuperables
// ============================================================================
// Yew no captura errores de render: los componentes informan con
// `use_error_reporter()` y los pánicos van a consola con
// console_error_panic_hook. Un 401 informado aquí expira la sesión.
// ============================================================================

use yew::prelude::*;

use crate::hooks::use_app_context;
use crate::services::AppError;
use crate::session::ErrorAction;

#[derive(Clone, PartialEq)]
pub struct ErrorReporter {
    pub report: Callback<AppError>,
}

/// Callback para enviar un error al boundary más cercano
#[hook]
pub fn use_error_reporter() -> Callback<AppError> {
    match use_context::<ErrorReporter>() {
        Some(reporter) => reporter.report,
        None => Callback::from(|err: AppError| log::error!("❌ Error sin boundary: {}", err)),
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBoundaryProps {
    pub children: Children,
}

#[function_component(ErrorBoundary)]
pub fn error_boundary(props: &ErrorBoundaryProps) -> Html {
    let context = use_app_context();
    let crashed = use_state(|| None::<AppError>);

    let reporter = {
        let crashed = crashed.clone();
        let interceptor = context.interceptor.clone();
        use_memo((), move |_| ErrorReporter {
            report: Callback::from(move |err: AppError| {
                if interceptor.handle_boundary(&err) == ErrorAction::CrashScreen {
                    crashed.set(Some(err));
                }
            }),
        })
    };

    match &*crashed {
        Some(err) => html! { <CrashScreen error={err.clone()} /> },
        None => html! {
            <ContextProvider<ErrorReporter> context={(*reporter).clone()}>
                {props.children.clone()}
            </ContextProvider<ErrorReporter>>
        },
    }
}

#[derive(Properties, PartialEq)]
struct CrashScreenProps {
    error: AppError,
}

#[function_component(CrashScreen)]
fn crash_screen(props: &CrashScreenProps) -> Html {
    let reload = Callback::from(|_: MouseEvent| {
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.location().reload() {
                log::error!("❌ No se pudo recargar: {:?}", e);
            }
        }
    });

    html! {
        <div class="crash-screen" role="alert">
            <h1>{"Something went wrong"}</h1>
            <p>{"An unexpected error occurred. Reload the page to continue."}</p>
            if cfg!(debug_assertions) {
                <pre class="crash-detail">{props.error.to_string()}</pre>
            }
            <button class="btn-primary" onclick={reload}>{"Reload"}</button>
        </div>
    }
}
