// ============================================================================
// TOASTER - cola de notificaciones con cierre automático
// ============================================================================

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::use_app_context;
use crate::state::{Toast, ToastVariant};

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let context = use_app_context();
    let toasts = use_state(|| context.toasts.toasts());

    {
        let toasts = toasts.clone();
        use_effect_with(context.toasts.clone(), move |queue| {
            toasts.set(queue.toasts());
            let subscription = queue.subscribe(move |current| toasts.set(current.clone()));
            move || drop(subscription)
        });
    }

    html! {
        <ol class="toaster" aria-live="polite">
            { for toasts.iter().map(|toast| html! { <ToastItem key={toast.id.to_string()} toast={toast.clone()} /> }) }
        </ol>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let context = use_app_context();
    let id = props.toast.id;

    {
        let queue = context.toasts.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timeout = Timeout::new(CONFIG.toast_duration_ms, move || queue.dismiss(id));
            move || drop(timeout)
        });
    }

    let dismiss = {
        let queue = context.toasts.clone();
        Callback::from(move |_: MouseEvent| queue.dismiss(id))
    };

    let class = match props.toast.variant {
        ToastVariant::Default => "toast",
        ToastVariant::Destructive => "toast toast-destructive",
    };

    html! {
        <li class={class}>
            <div class="toast-body">
                <strong class="toast-title">{&props.toast.title}</strong>
                if let Some(description) = &props.toast.description {
                    <p class="toast-description">{description}</p>
                }
            </div>
            <button class="toast-close" aria-label="Close" onclick={dismiss}>{"✕"}</button>
        </li>
    }
}
