/// Clave del blob de sesión persistido
pub const STORAGE_KEY_SESSION: &str = "admin-storage";

/// Versión del formato persistido bajo STORAGE_KEY_SESSION
pub const SESSION_STORAGE_VERSION: u32 = 0;

/// Claves de "recordarme"
pub const STORAGE_KEY_REMEMBER_ME: &str = "rememberMe";
pub const STORAGE_KEY_REMEMBERED_EMAIL: &str = "rememberedEmail";
/// Versiones anteriores guardaban la contraseña en claro; solo se borra
pub const STORAGE_KEY_LEGACY_PASSWORD: &str = "rememberedPassword";

/// Mensaje genérico cuando el servidor no devuelve `message`
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Rutas de navegación usadas por los guards
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/";

/// Login rechazado (401 en /admin/login sin `message`)
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
