pub mod api_client;
pub mod cancel;
pub mod endpoints;
pub mod error;

pub mod admin_service;
pub mod category_service;
pub mod customer_service;
pub mod order_service;
pub mod payment_service;
pub mod product_service;
pub mod settings_service;
pub mod shop_service;
pub mod subcategory_service;

pub use api_client::ApiClient;
pub use cancel::CancelToken;
pub use error::{ApiError, AppError};
