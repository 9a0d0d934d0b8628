pub mod session_context;
pub mod use_auth;
pub mod use_mutation;
pub mod use_query;
pub mod use_resources;
pub mod use_session;

pub use session_context::{use_app_context, AppContext, AppContextProvider};
pub use use_auth::{use_auth, LoginForm, UseAuthHandle};
pub use use_mutation::{use_mutation, MutationOptions, UseMutationHandle};
pub use use_query::{use_query, UseQueryHandle};
pub use use_resources::*;
pub use use_session::use_session;
