// ============================================================================
// SHOP ADMIN CONSOLE - Yew + WASM
// ============================================================================
// - session: estado de autenticación, persistencia, guards, política de errores
// - query: caché de consultas con deduplicación e invalidación
// - services: cliente HTTP y un módulo por recurso de la API
// - hooks / components: capa Yew
// ============================================================================

pub mod components;
pub mod config;
pub mod hooks;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

use config::CONFIG;

/// Inicializa logging y panics, y monta la app en `<body>`
pub fn run() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Shop Admin Console ({}) → {}", CONFIG.environment, CONFIG.api_base_url);

    yew::Renderer::<components::App>::new().render();
}
