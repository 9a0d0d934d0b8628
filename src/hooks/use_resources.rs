// ============================================================================
// HOOKS POR RECURSO - consultas y mutaciones de cada sección de la consola
// ============================================================================
// Las claves salen de query::keys y lo que invalida cada mutación de
// keys::invalidations_for.
// ============================================================================

use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::hooks::use_mutation::{use_mutation, MutationOptions, UseMutationHandle};
use crate::hooks::use_query::{use_query, UseQueryHandle};
use crate::models::{
    AdminAccount, AdminInput, Category, CategoryInput, Customer, Order, OrderStatus, Payment, Product,
    ProductInput, Settings, Shop, ShopInput, Subcategory, UserSummary, Variant, VariantInput,
};
use crate::query::keys::{self, invalidations_for};
use crate::services::endpoints::{Operation, Resource};
use crate::session::flows;
use crate::services::{
    admin_service, category_service, customer_service, order_service, payment_service, product_service,
    settings_service, shop_service, subcategory_service, ApiClient, ApiError, CancelToken,
};

fn options<O>(resource: Resource, operation: Operation, message: &str) -> MutationOptions<O> {
    MutationOptions::invalidating(invalidations_for(resource, operation)).with_success_message(message)
}

// ---------------------------------------------------------------------------
// Usuario actual y dashboard
// ---------------------------------------------------------------------------

/// `/admin/me`; refresca el usuario guardado en la sesión si cambió
#[hook]
pub fn use_current_user() -> UseQueryHandle<UserSummary> {
    let context = use_app_context();
    let handle = use_query(keys::me(), |api, cancel| async move {
        admin_service::current_user(&api, &cancel).await
    });

    {
        let session = context.session.clone();
        use_effect_with(handle.data.clone(), move |fresh| {
            if let Some(fresh) = fresh {
                flows::refresh_user(&session, fresh);
            }
        });
    }

    handle
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub products: usize,
    pub orders: usize,
    pub customers: usize,
    pub pending_orders: usize,
    pub revenue: f64,
}

impl DashboardSummary {
    pub fn from_lists(products: &[Product], orders: &[Order], customers: &[Customer]) -> Self {
        Self {
            products: products.len(),
            orders: orders.len(),
            customers: customers.len(),
            pending_orders: orders.iter().filter(|o| o.status == OrderStatus::Pending).count(),
            revenue: orders
                .iter()
                .filter(|o| o.status != OrderStatus::Cancelled)
                .map(|o| o.total)
                .sum(),
        }
    }
}

async fn load_dashboard(api: ApiClient, cancel: CancelToken) -> Result<DashboardSummary, ApiError> {
    let (products, orders, customers) = futures::try_join!(
        product_service::list_products(&api, &cancel),
        order_service::list_orders(&api, &cancel),
        customer_service::list_customers(&api, &cancel),
    )?;
    Ok(DashboardSummary::from_lists(&products, &orders, &customers))
}

#[hook]
pub fn use_dashboard() -> UseQueryHandle<DashboardSummary> {
    use_query(keys::dashboard(), load_dashboard)
}

// ---------------------------------------------------------------------------
// Listados
// ---------------------------------------------------------------------------

#[hook]
pub fn use_products() -> UseQueryHandle<Vec<Product>> {
    use_query(keys::resource(Resource::Product), |api, cancel| async move {
        product_service::list_products(&api, &cancel).await
    })
}

#[hook]
pub fn use_product_variants(product_id: String) -> UseQueryHandle<Vec<Variant>> {
    let key = keys::resource(Resource::Variant).with(product_id.clone());
    use_query(key, move |api, cancel| {
        let product_id = product_id.clone();
        async move { product_service::list_variants(&api, &product_id, &cancel).await }
    })
}

#[hook]
pub fn use_orders() -> UseQueryHandle<Vec<Order>> {
    use_query(keys::resource(Resource::Order), |api, cancel| async move {
        order_service::list_orders(&api, &cancel).await
    })
}

#[hook]
pub fn use_customers() -> UseQueryHandle<Vec<Customer>> {
    use_query(keys::resource(Resource::Customer), |api, cancel| async move {
        customer_service::list_customers(&api, &cancel).await
    })
}

#[hook]
pub fn use_shops() -> UseQueryHandle<Vec<Shop>> {
    use_query(keys::resource(Resource::Shop), |api, cancel| async move {
        shop_service::list_shops(&api, &cancel).await
    })
}

#[hook]
pub fn use_categories() -> UseQueryHandle<Vec<Category>> {
    use_query(keys::resource(Resource::Category), |api, cancel| async move {
        category_service::list_categories(&api, &cancel).await
    })
}

#[hook]
pub fn use_subcategories() -> UseQueryHandle<Vec<Subcategory>> {
    use_query(keys::resource(Resource::Subcategory), |api, cancel| async move {
        subcategory_service::list_subcategories(&api, &cancel).await
    })
}

#[hook]
pub fn use_payments() -> UseQueryHandle<Vec<Payment>> {
    use_query(keys::resource(Resource::Payment), |api, cancel| async move {
        payment_service::list_payments(&api, &cancel).await
    })
}

#[hook]
pub fn use_admins() -> UseQueryHandle<Vec<AdminAccount>> {
    use_query(keys::resource(Resource::Admin), |api, cancel| async move {
        admin_service::list_admins(&api, &cancel).await
    })
}

#[hook]
pub fn use_settings() -> UseQueryHandle<Settings> {
    use_query(keys::resource(Resource::Settings), |api, cancel| async move {
        settings_service::get_settings(&api, &cancel).await
    })
}

// ---------------------------------------------------------------------------
// Mutaciones
// ---------------------------------------------------------------------------

async fn delete_resource(resource: Resource, api: ApiClient, id: String, cancel: CancelToken) -> Result<(), ApiError> {
    match resource {
        Resource::Admin => admin_service::delete_admin(&api, &id, &cancel).await,
        Resource::Product => product_service::delete_product(&api, &id, &cancel).await,
        Resource::Variant => product_service::delete_variant(&api, &id, &cancel).await,
        Resource::Order => order_service::delete_order(&api, &id, &cancel).await,
        Resource::Customer => customer_service::delete_customer(&api, &id, &cancel).await,
        Resource::Shop => shop_service::delete_shop(&api, &id, &cancel).await,
        Resource::Category => category_service::delete_category(&api, &id, &cancel).await,
        Resource::Subcategory => subcategory_service::delete_subcategory(&api, &id, &cancel).await,
        Resource::Payment | Resource::Settings => {
            log::error!("❌ {:?} no admite borrado", resource);
            Err(ApiError::Http {
                status: 405,
                message: Some(format!("{:?} cannot be deleted", resource)),
            })
        }
    }
}

/// Borrado por id para cualquier recurso de las tablas
#[hook]
pub fn use_delete(resource: Resource) -> UseMutationHandle<String, ()> {
    use_mutation(
        move |api, cancel, id: String| delete_resource(resource, api, id, cancel),
        options(resource, Operation::Delete, "Deleted"),
    )
}

#[hook]
pub fn use_create_product() -> UseMutationHandle<ProductInput, Product> {
    use_mutation(
        |api, cancel, input: ProductInput| async move { product_service::create_product(&api, &input, &cancel).await },
        options(Resource::Product, Operation::Create, "Product created"),
    )
}

#[hook]
pub fn use_update_product() -> UseMutationHandle<(String, ProductInput), Product> {
    use_mutation(
        |api, cancel, (id, input): (String, ProductInput)| async move {
            product_service::update_product(&api, &id, &input, &cancel).await
        },
        options(Resource::Product, Operation::Update, "Product updated"),
    )
}

#[hook]
pub fn use_create_variant() -> UseMutationHandle<(String, VariantInput), Variant> {
    use_mutation(
        |api, cancel, (product_id, input): (String, VariantInput)| async move {
            product_service::create_variant(&api, &product_id, &input, &cancel).await
        },
        options(Resource::Variant, Operation::Create, "Variant created"),
    )
}

#[hook]
pub fn use_update_order_status() -> UseMutationHandle<(String, OrderStatus), Order> {
    use_mutation(
        |api, cancel, (id, status): (String, OrderStatus)| async move {
            order_service::update_order_status(&api, &id, status, &cancel).await
        },
        options(Resource::Order, Operation::UpdateStatus, "Order status updated"),
    )
}

#[hook]
pub fn use_create_shop() -> UseMutationHandle<ShopInput, Shop> {
    use_mutation(
        |api, cancel, input: ShopInput| async move { shop_service::create_shop(&api, &input, &cancel).await },
        options(Resource::Shop, Operation::Create, "Shop created"),
    )
}

#[hook]
pub fn use_create_category() -> UseMutationHandle<CategoryInput, Category> {
    use_mutation(
        |api, cancel, input: CategoryInput| async move {
            category_service::create_category(&api, &input, &cancel).await
        },
        options(Resource::Category, Operation::Create, "Category created"),
    )
}

#[hook]
pub fn use_create_subcategory() -> UseMutationHandle<CategoryInput, Subcategory> {
    use_mutation(
        |api, cancel, input: CategoryInput| async move {
            subcategory_service::create_subcategory(&api, &input, &cancel).await
        },
        options(Resource::Subcategory, Operation::Create, "Subcategory created"),
    )
}

#[hook]
pub fn use_create_admin() -> UseMutationHandle<AdminInput, AdminAccount> {
    use_mutation(
        |api, cancel, input: AdminInput| async move { admin_service::create_admin(&api, &input, &cancel).await },
        options(Resource::Admin, Operation::Create, "Admin created"),
    )
}

#[hook]
pub fn use_update_settings() -> UseMutationHandle<Settings, Settings> {
    use_mutation(
        |api, cancel, settings: Settings| async move {
            settings_service::update_settings(&api, &settings, &cancel).await
        },
        options(Resource::Settings, Operation::Update, "Settings saved"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    fn order(id: &str, total: f64, status: OrderStatus) -> Order {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "total": total,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn dashboard_summary_skips_cancelled_orders_in_revenue() {
        let orders = vec![
            order("o1", 10.0, OrderStatus::Pending),
            order("o2", 25.5, OrderStatus::Delivered),
            order("o3", 99.0, OrderStatus::Cancelled),
        ];

        let summary = DashboardSummary::from_lists(&[], &orders, &[]);

        assert_eq!(summary.orders, 3);
        assert_eq!(summary.pending_orders, 1);
        assert!((summary.revenue - 35.5).abs() < f64::EPSILON);
    }

    #[test]
    fn payments_cannot_be_deleted() {
        let result = futures::executor::block_on(delete_resource(
            Resource::Payment,
            ApiClient::default(),
            "pay1".into(),
            CancelToken::none(),
        ));
        assert_eq!(result.unwrap_err().status(), Some(405));
    }
}
