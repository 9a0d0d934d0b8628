pub mod reactivity;
pub mod toasts;

pub use reactivity::{Listeners, Subscription};
pub use toasts::{Toast, ToastQueue, ToastVariant};
