pub mod auth;
pub mod admin;
pub mod catalog;
pub mod commerce;

pub use auth::{LoginRequest, LoginResponse, Role, UserSummary};
pub use admin::{AdminAccount, AdminInput, Settings};
pub use catalog::{Category, CategoryInput, Product, ProductInput, Subcategory, Variant, VariantInput};
pub use commerce::{Customer, Order, OrderStatus, OrderStatusUpdate, Payment, Shop, ShopInput};

/// Fila de las tablas genéricas de la consola
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn row_id(&self) -> &str;
    fn cells(&self) -> Vec<String>;
}
