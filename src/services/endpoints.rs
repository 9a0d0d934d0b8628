// ============================================================================
// ENDPOINTS - tabla estática de rutas de la API
// ============================================================================
// Plantillas con parámetros `:nombre`, indexadas por recurso y operación.
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Admin,
    Product,
    Variant,
    Order,
    Customer,
    Shop,
    Category,
    Subcategory,
    Payment,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Me,
    UpdateStatus,
}

const ENDPOINTS: &[(Resource, Operation, &str)] = &[
    (Resource::Admin, Operation::Login, "/admin/login"),
    (Resource::Admin, Operation::Logout, "/admin/logout"),
    (Resource::Admin, Operation::Me, "/admin/me"),
    (Resource::Admin, Operation::List, "/admin/alladmins"),
    (Resource::Admin, Operation::Get, "/admin/getadmin/:id"),
    (Resource::Admin, Operation::Create, "/admin/create"),
    (Resource::Admin, Operation::Update, "/admin/update/:id"),
    (Resource::Admin, Operation::Delete, "/admin/delete/:id"),
    (Resource::Product, Operation::List, "/product/allproducts"),
    (Resource::Product, Operation::Get, "/product/getproduct/:id"),
    (Resource::Product, Operation::Create, "/product/create"),
    (Resource::Product, Operation::Update, "/product/update/:id"),
    (Resource::Product, Operation::Delete, "/product/delete/:id"),
    (Resource::Variant, Operation::List, "/product/:productId/variants"),
    (Resource::Variant, Operation::Create, "/product/:productId/variants/create"),
    (Resource::Variant, Operation::Update, "/product/variants/update/:id"),
    (Resource::Variant, Operation::Delete, "/product/variants/delete/:id"),
    (Resource::Order, Operation::List, "/order/getOrder"),
    (Resource::Order, Operation::Get, "/order/getOrder/:id"),
    (Resource::Order, Operation::UpdateStatus, "/order/updateStatus/:id"),
    (Resource::Order, Operation::Delete, "/order/delete/:id"),
    (Resource::Customer, Operation::List, "/customer/allcustomers"),
    (Resource::Customer, Operation::Get, "/customer/getcustomer/:id"),
    (Resource::Customer, Operation::Delete, "/customer/delete/:id"),
    (Resource::Shop, Operation::List, "/shop/allshops"),
    (Resource::Shop, Operation::Get, "/shop/getshop/:id"),
    (Resource::Shop, Operation::Create, "/shop/create"),
    (Resource::Shop, Operation::Update, "/shop/update/:id"),
    (Resource::Shop, Operation::Delete, "/shop/delete/:id"),
    (Resource::Category, Operation::List, "/category/allcategories"),
    (Resource::Category, Operation::Create, "/category/create"),
    (Resource::Category, Operation::Update, "/category/update/:id"),
    (Resource::Category, Operation::Delete, "/category/delete/:id"),
    (Resource::Subcategory, Operation::List, "/subcategory/allsubcategories"),
    (Resource::Subcategory, Operation::Create, "/subcategory/create"),
    (Resource::Subcategory, Operation::Update, "/subcategory/update/:id"),
    (Resource::Subcategory, Operation::Delete, "/subcategory/delete/:id"),
    (Resource::Payment, Operation::List, "/payment/allpayments"),
    (Resource::Payment, Operation::Get, "/payment/getpayment/:id"),
    (Resource::Settings, Operation::Get, "/settings"),
    (Resource::Settings, Operation::Update, "/settings/update"),
];

/// Plantilla de la ruta, si la API expone esa operación
pub fn template(resource: Resource, operation: Operation) -> Option<&'static str> {
    ENDPOINTS
        .iter()
        .find(|(r, o, _)| *r == resource && *o == operation)
        .map(|(_, _, path)| *path)
}

/// Sustituye los `:parametros` de la plantilla. Parámetros sin valor
/// se dejan tal cual para que el error sea visible en el log.
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| {
                    log::warn!("⚠️ Parámetro sin valor en {}: {}", template, name);
                    segment.to_string()
                }),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Ruta lista para usar. Una operación inexistente es un error de
/// programación; se registra y se devuelve la raíz del recurso.
pub fn path(resource: Resource, operation: Operation, params: &[(&str, &str)]) -> String {
    match template(resource, operation) {
        Some(t) => render(t, params),
        None => {
            log::error!("❌ Endpoint inexistente: {:?} {:?}", resource, operation);
            format!("/{}", format!("{:?}", resource).to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_can_be_listed_or_read() {
        for resource in [
            Resource::Admin,
            Resource::Product,
            Resource::Variant,
            Resource::Order,
            Resource::Customer,
            Resource::Shop,
            Resource::Category,
            Resource::Subcategory,
            Resource::Payment,
        ] {
            assert!(template(resource, Operation::List).is_some(), "{resource:?}");
        }
        assert_eq!(template(Resource::Settings, Operation::Get), Some("/settings"));
    }

    #[test]
    fn templates_are_unique_per_key() {
        for (i, (r, o, _)) in ENDPOINTS.iter().enumerate() {
            let dupes = ENDPOINTS[i + 1..].iter().filter(|(r2, o2, _)| r2 == r && o2 == o).count();
            assert_eq!(dupes, 0, "{r:?} {o:?} declared twice");
        }
    }

    #[test]
    fn renders_parameters() {
        assert_eq!(
            path(Resource::Variant, Operation::List, &[("productId", "p-9")]),
            "/product/p-9/variants"
        );
        assert_eq!(path(Resource::Order, Operation::UpdateStatus, &[("id", "42")]), "/order/updateStatus/42");
        assert_eq!(path(Resource::Admin, Operation::Login, &[]), "/admin/login");
    }

    #[test]
    fn missing_parameters_stay_visible() {
        assert_eq!(render("/product/update/:id", &[]), "/product/update/:id");
    }

    #[test]
    fn unknown_operation_falls_back_to_resource_root() {
        assert_eq!(template(Resource::Payment, Operation::Delete), None);
        assert_eq!(path(Resource::Payment, Operation::Delete, &[("id", "1")]), "/payment");
    }
}
