// Claves de caché y reglas de invalidación por mutación

use std::fmt;

use crate::services::endpoints::{Operation, Resource};

/// Clave jerárquica: `["products"]`, `["products", "p1"]`, `["variants", "p1"]`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn root(name: &str) -> Self {
        Self(vec![name.to_string()])
    }

    pub fn with(mut self, part: impl Into<String>) -> Self {
        self.0.push(part.into());
        self
    }

    /// `["products","p1"]` empieza por `["products"]`
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

pub fn me() -> QueryKey {
    QueryKey::root("me")
}

pub fn dashboard() -> QueryKey {
    QueryKey::root("dashboard")
}

/// Clave raíz de las listas de cada recurso
pub fn resource(resource: Resource) -> QueryKey {
    QueryKey::root(match resource {
        Resource::Admin => "admins",
        Resource::Product => "products",
        Resource::Variant => "variants",
        Resource::Order => "orders",
        Resource::Customer => "customers",
        Resource::Shop => "shops",
        Resource::Category => "categories",
        Resource::Subcategory => "subcategories",
        Resource::Payment => "payments",
        Resource::Settings => "settings",
    })
}

/// Qué consultas quedan obsoletas cuando una mutación termina bien
pub fn invalidations_for(target: Resource, operation: Operation) -> Vec<QueryKey> {
    match (target, operation) {
        (Resource::Admin, Operation::Login) => vec![me()],
        (Resource::Admin, Operation::Logout) => Vec::new(),
        (_, Operation::List | Operation::Get | Operation::Me) => Vec::new(),
        (Resource::Product, _) => vec![resource(Resource::Product), resource(Resource::Variant), dashboard()],
        (Resource::Variant, _) => vec![resource(Resource::Variant), resource(Resource::Product)],
        (Resource::Order, _) => vec![resource(Resource::Order), resource(Resource::Payment), dashboard()],
        (Resource::Customer, _) => vec![resource(Resource::Customer), resource(Resource::Order)],
        (Resource::Shop, _) => vec![resource(Resource::Shop), resource(Resource::Product)],
        (Resource::Category, _) => vec![
            resource(Resource::Category),
            resource(Resource::Subcategory),
            resource(Resource::Product),
        ],
        (Resource::Subcategory, _) => vec![resource(Resource::Subcategory), resource(Resource::Product)],
        (Resource::Admin, _) => vec![resource(Resource::Admin), me()],
        (Resource::Settings, _) => vec![resource(Resource::Settings)],
        (Resource::Payment, _) => vec![resource(Resource::Payment)],
    }
}
