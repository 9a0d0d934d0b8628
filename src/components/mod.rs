pub mod app;
pub mod error_boundary;
pub mod guards;
pub mod layout;
pub mod login_screen;
pub mod pages;
pub mod resource_table;
pub mod toaster;

pub use app::App;
pub use error_boundary::{use_error_reporter, ErrorBoundary, ErrorReporter};
pub use guards::{ProtectedRoute, RedirectIfAuthenticated};
pub use layout::AdminLayout;
pub use login_screen::LoginScreen;
pub use resource_table::ResourceTable;
pub use toaster::Toaster;
