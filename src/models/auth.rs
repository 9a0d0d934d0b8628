use serde::{Deserialize, Serialize};

/// Rol del administrador (conjunto cerrado)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    ShopSellerSiteAdmin,
    ShopAdmin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super admin",
            Role::Admin => "Admin",
            Role::ShopSellerSiteAdmin => "Shop seller (site admin)",
            Role::ShopAdmin => "Shop admin",
        }
    }

    /// Puede gestionar otros administradores
    pub fn can_manage_admins(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

/// Usuario en sesión
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Pide al servidor una cookie httpOnly de larga duración
    pub remember_me: bool,
}

/// Contenido de `data` en la respuesta de /admin/login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub user: UserSummary,
}
