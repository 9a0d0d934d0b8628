use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::auth::Role;
use super::TableRow;

/// Cuenta de administrador gestionada desde la consola
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub shop_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,
}

/// Ajustes de la plataforma: la consola no interpreta las claves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings(pub Map<String, Value>);

impl TableRow for AdminAccount {
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Role"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.role.label().to_string()]
    }
}
