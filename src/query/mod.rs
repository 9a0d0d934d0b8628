pub mod client;
pub mod keys;

pub use client::{CacheEvent, QueryClient};
pub use keys::QueryKey;
