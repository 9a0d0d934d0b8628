pub mod events;
pub mod flows;
pub mod guard;
pub mod interceptor;
pub mod persistence;
pub mod remember;
pub mod state;
pub mod store;

pub use events::{SessionEvent, SessionSignal};
pub use guard::GuardDecision;
pub use interceptor::{ErrorAction, ErrorInterceptor, ErrorOrigin};
pub use persistence::{SessionPersistence, StoragePersistence};
pub use state::Session;
pub use store::SessionStore;
