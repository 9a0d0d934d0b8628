// ============================================================================
// PAGES - una página por sección de la consola
// ============================================================================

use serde_json::Value;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::error_boundary::use_error_reporter;
use crate::components::resource_table::{error_message, ResourceTable};
use crate::hooks::*;
use crate::models::{
    AdminAccount, Category, Customer, Order, OrderStatus, Payment, Product, Role, Settings, Shop, Subcategory,
    Variant,
};
use crate::routes::Route;
use crate::services::endpoints::Resource;
use crate::services::{ApiError, AppError};
use crate::utils::validation::{
    validate_admin, validate_category, validate_product, validate_settings, validate_shop, validate_variant,
    FieldErrors,
};

const ORDER_STATUSES: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

const ROLES: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::ShopSellerSiteAdmin, Role::ShopAdmin];

// ---------------------------------------------------------------------------
// Helpers de formulario
// ---------------------------------------------------------------------------

fn text_field(label: &'static str, kind: &'static str, value: &UseStateHandle<String>, error: Option<&str>) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };

    html! {
        <label class="form-field">
            <span>{label}</span>
            <input type={kind} value={(**value).clone()} {oninput} />
            {field_error(error)}
        </label>
    }
}

/// Error de validación bajo su campo, como en el login
fn field_error(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! { <p class="field-error">{message.to_string()}</p> },
        None => Html::default(),
    }
}

/// Respuestas con forma inesperada rompen la página: van al boundary
#[hook]
fn use_report_decode_errors(error: Option<ApiError>) {
    let report = use_error_reporter();
    use_effect_with(error, move |error| {
        if let Some(err @ ApiError::Decode(_)) = error {
            report.emit(AppError::Api(err.clone()));
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let dashboard = use_dashboard();
    use_report_decode_errors(dashboard.error.clone());

    let card = |label: &'static str, value: String| {
        html! {
            <div class="stat-card">
                <span class="stat-label">{label}</span>
                <span class="stat-value">{value}</span>
            </div>
        }
    };

    html! {
        <section class="dashboard">
            <h2>{"Dashboard"}</h2>
            { match (&dashboard.data, &dashboard.error) {
                (Some(summary), _) => html! {
                    <div class="stat-grid">
                        {card("Products", summary.products.to_string())}
                        {card("Orders", summary.orders.to_string())}
                        {card("Pending orders", summary.pending_orders.to_string())}
                        {card("Customers", summary.customers.to_string())}
                        {card("Revenue", format!("{:.2}", summary.revenue))}
                    </div>
                },
                (None, Some(error)) => html! { <p class="table-error">{error_message(error)}</p> },
                (None, None) => html! { <p class="table-loading">{"Loading…"}</p> },
            }}
        </section>
    }
}

// ---------------------------------------------------------------------------
// Productos y variantes
// ---------------------------------------------------------------------------

#[function_component(ProductsPage)]
pub fn products_page() -> Html {
    let products = use_products();
    use_report_decode_errors(products.error.clone());
    let delete = use_delete(Resource::Product);
    let create = use_create_product();

    let name = use_state(String::new);
    let price = use_state(String::new);
    let stock = use_state(String::new);
    let errors = use_state(FieldErrors::default);

    let on_submit = {
        let (name, price, stock, errors) = (name.clone(), price.clone(), stock.clone(), errors.clone());
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_product(&name, &price, &stock) {
                Ok(input) => {
                    errors.set(FieldErrors::default());
                    run.emit(input);
                    name.set(String::new());
                    price.set(String::new());
                    stock.set(String::new());
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <ResourceTable<Product>
            title="Products"
            rows={products.data.clone()}
            loading={products.loading}
            error={products.error.clone()}
            on_delete={delete.run.clone()}
            detail={Callback::from(|id: String| Route::ProductVariants { id })}
            detail_label="Variants"
        >
            <form class="inline-form" onsubmit={on_submit}>
                {text_field("Name", "text", &name, errors.get("name"))}
                {text_field("Price", "number", &price, errors.get("price"))}
                {text_field("Stock", "number", &stock, errors.get("stock"))}
                <button type="submit" class="btn-primary" disabled={create.loading}>{"Add product"}</button>
            </form>
        </ResourceTable<Product>>
    }
}

#[derive(Properties, PartialEq)]
pub struct VariantsPageProps {
    pub product_id: String,
}

#[function_component(VariantsPage)]
pub fn variants_page(props: &VariantsPageProps) -> Html {
    let variants = use_product_variants(props.product_id.clone());
    use_report_decode_errors(variants.error.clone());
    let delete = use_delete(Resource::Variant);
    let create = use_create_variant();

    let sku = use_state(String::new);
    let price = use_state(String::new);
    let stock = use_state(String::new);
    let errors = use_state(FieldErrors::default);

    let on_submit = {
        let (sku, price, stock, errors) = (sku.clone(), price.clone(), stock.clone(), errors.clone());
        let product_id = props.product_id.clone();
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_variant(&sku, &price, &stock) {
                Ok(input) => {
                    errors.set(FieldErrors::default());
                    run.emit((product_id.clone(), input));
                    sku.set(String::new());
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <>
            <Link<Route> to={Route::Products} classes="back-link">{"← Products"}</Link<Route>>
            <ResourceTable<Variant>
                title="Variants"
                rows={variants.data.clone()}
                loading={variants.loading}
                error={variants.error.clone()}
                on_delete={delete.run.clone()}
            >
                <form class="inline-form" onsubmit={on_submit}>
                    {text_field("SKU", "text", &sku, errors.get("sku"))}
                    {text_field("Price", "number", &price, errors.get("price"))}
                    {text_field("Stock", "number", &stock, errors.get("stock"))}
                    <button type="submit" class="btn-primary" disabled={create.loading}>{"Add variant"}</button>
                </form>
            </ResourceTable<Variant>>
        </>
    }
}

// ---------------------------------------------------------------------------
// Pedidos, clientes y pagos
// ---------------------------------------------------------------------------

#[function_component(OrdersPage)]
pub fn orders_page() -> Html {
    let orders = use_orders();
    use_report_decode_errors(orders.error.clone());
    let delete = use_delete(Resource::Order);
    let update_status = use_update_order_status();

    let row_actions = {
        let run = update_status.run.clone();
        Callback::from(move |id: String| {
            let run = run.clone();
            let onchange = Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                match serde_json::from_value::<OrderStatus>(Value::String(select.value())) {
                    Ok(OrderStatus::Unknown) | Err(_) => {}
                    Ok(status) => run.emit((id.clone(), status)),
                }
                select.set_value("");
            });
            html! {
                <select class="status-select" {onchange}>
                    <option value="" selected=true>{"Set status…"}</option>
                    { for ORDER_STATUSES.iter().map(|status| html! {
                        <option value={status.label().to_lowercase()}>{status.label()}</option>
                    }) }
                </select>
            }
        })
    };

    html! {
        <ResourceTable<Order>
            title="Orders"
            rows={orders.data.clone()}
            loading={orders.loading}
            error={orders.error.clone()}
            on_delete={delete.run.clone()}
            {row_actions}
        />
    }
}

#[function_component(CustomersPage)]
pub fn customers_page() -> Html {
    let customers = use_customers();
    use_report_decode_errors(customers.error.clone());
    let delete = use_delete(Resource::Customer);

    html! {
        <ResourceTable<Customer>
            title="Customers"
            rows={customers.data.clone()}
            loading={customers.loading}
            error={customers.error.clone()}
            on_delete={delete.run.clone()}
        />
    }
}

#[function_component(PaymentsPage)]
pub fn payments_page() -> Html {
    let payments = use_payments();
    use_report_decode_errors(payments.error.clone());

    html! {
        <ResourceTable<Payment>
            title="Payments"
            rows={payments.data.clone()}
            loading={payments.loading}
            error={payments.error.clone()}
        />
    }
}

// ---------------------------------------------------------------------------
// Tiendas y categorías
// ---------------------------------------------------------------------------

#[function_component(ShopsPage)]
pub fn shops_page() -> Html {
    let shops = use_shops();
    use_report_decode_errors(shops.error.clone());
    let delete = use_delete(Resource::Shop);
    let create = use_create_shop();

    let name = use_state(String::new);
    let owner_email = use_state(String::new);
    let errors = use_state(FieldErrors::default);

    let on_submit = {
        let (name, owner_email, errors) = (name.clone(), owner_email.clone(), errors.clone());
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_shop(&name, &owner_email) {
                Ok(input) => {
                    errors.set(FieldErrors::default());
                    run.emit(input);
                    name.set(String::new());
                    owner_email.set(String::new());
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <ResourceTable<Shop>
            title="Shops"
            rows={shops.data.clone()}
            loading={shops.loading}
            error={shops.error.clone()}
            on_delete={delete.run.clone()}
        >
            <form class="inline-form" onsubmit={on_submit}>
                {text_field("Name", "text", &name, errors.get("name"))}
                {text_field("Owner email", "email", &owner_email, errors.get("owner_email"))}
                <button type="submit" class="btn-primary" disabled={create.loading}>{"Add shop"}</button>
            </form>
        </ResourceTable<Shop>>
    }
}

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let categories = use_categories();
    use_report_decode_errors(categories.error.clone());
    let delete = use_delete(Resource::Category);
    let create = use_create_category();
    let name = use_state(String::new);
    let errors = use_state(FieldErrors::default);

    let on_submit = {
        let (name, errors) = (name.clone(), errors.clone());
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_category(&name, None) {
                Ok(input) => {
                    errors.set(FieldErrors::default());
                    run.emit(input);
                    name.set(String::new());
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <ResourceTable<Category>
            title="Categories"
            rows={categories.data.clone()}
            loading={categories.loading}
            error={categories.error.clone()}
            on_delete={delete.run.clone()}
        >
            <form class="inline-form" onsubmit={on_submit}>
                {text_field("Name", "text", &name, errors.get("name"))}
                <button type="submit" class="btn-primary" disabled={create.loading}>{"Add category"}</button>
            </form>
        </ResourceTable<Category>>
    }
}

#[function_component(SubcategoriesPage)]
pub fn subcategories_page() -> Html {
    let subcategories = use_subcategories();
    use_report_decode_errors(subcategories.error.clone());
    let categories = use_categories();
    let delete = use_delete(Resource::Subcategory);
    let create = use_create_subcategory();
    let name = use_state(String::new);
    let category_id = use_state(String::new);
    let errors = use_state(FieldErrors::default);

    let on_category = {
        let category_id = category_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            category_id.set(select.value());
        })
    };

    let on_submit = {
        let (name, category_id, errors) = (name.clone(), category_id.clone(), errors.clone());
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_category(&name, Some(category_id.as_str())) {
                Ok(input) => {
                    errors.set(FieldErrors::default());
                    run.emit(input);
                    name.set(String::new());
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <ResourceTable<Subcategory>
            title="Subcategories"
            rows={subcategories.data.clone()}
            loading={subcategories.loading}
            error={subcategories.error.clone()}
            on_delete={delete.run.clone()}
        >
            <form class="inline-form" onsubmit={on_submit}>
                {text_field("Name", "text", &name, errors.get("name"))}
                <label class="form-field">
                    <span>{"Category"}</span>
                    <select onchange={on_category}>
                        <option value="" selected={category_id.is_empty()}>{"Choose…"}</option>
                        { for categories.data.iter().flatten().map(|category| html! {
                            <option value={category.id.clone()} selected={*category_id == category.id}>
                                {category.name.clone()}
                            </option>
                        }) }
                    </select>
                    {field_error(errors.get("category"))}
                </label>
                <button type="submit" class="btn-primary" disabled={create.loading}>{"Add subcategory"}</button>
            </form>
        </ResourceTable<Subcategory>>
    }
}

// ---------------------------------------------------------------------------
// Administradores y ajustes
// ---------------------------------------------------------------------------

#[function_component(AdminsPage)]
pub fn admins_page() -> Html {
    let session = use_session();
    let admins = use_admins();
    use_report_decode_errors(admins.error.clone());
    let delete = use_delete(Resource::Admin);
    let create = use_create_admin();

    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let role = use_state(|| Role::Admin);
    let errors = use_state(FieldErrors::default);

    let can_manage = session.user().is_some_and(|user| user.role.can_manage_admins());
    if !can_manage {
        return html! {
            <section class="resource-section">
                <h2>{"Admins"}</h2>
                <p class="table-error">{"Only super admins can manage admin accounts."}</p>
            </section>
        };
    }

    let on_role = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(selected) = serde_json::from_value::<Role>(Value::String(select.value())) {
                role.set(selected);
            }
        })
    };

    let on_submit = {
        let (name, email, password, role) = (name.clone(), email.clone(), password.clone(), role.clone());
        let errors = errors.clone();
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_admin(&name, &email, &password, *role) {
                Ok(input) => {
                    errors.set(FieldErrors::default());
                    run.emit(input);
                    password.set(String::new());
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <ResourceTable<AdminAccount>
            title="Admins"
            rows={admins.data.clone()}
            loading={admins.loading}
            error={admins.error.clone()}
            on_delete={delete.run.clone()}
        >
            <form class="inline-form" onsubmit={on_submit}>
                {text_field("Name", "text", &name, errors.get("name"))}
                {text_field("Email", "email", &email, errors.get("email"))}
                {text_field("Password", "password", &password, errors.get("password"))}
                <label class="form-field">
                    <span>{"Role"}</span>
                    <select onchange={on_role}>
                        { for ROLES.iter().map(|option| html! {
                            <option
                                value={serde_json::to_value(option).ok().and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default()}
                                selected={*role == *option}
                            >
                                {option.label()}
                            </option>
                        }) }
                    </select>
                </label>
                <button type="submit" class="btn-primary" disabled={create.loading}>{"Add admin"}</button>
            </form>
        </ResourceTable<AdminAccount>>
    }
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let settings = use_settings();
    use_report_decode_errors(settings.error.clone());
    let update = use_update_settings();
    let draft = use_state(String::new);
    let errors = use_state(FieldErrors::default);

    // Al llegar datos nuevos se reinicia el borrador
    {
        let draft = draft.clone();
        use_effect_with(settings.data.clone(), move |data| {
            if let Some(Settings(map)) = data {
                draft.set(serde_json::to_string_pretty(map).unwrap_or_default());
            }
        });
    }

    let oninput = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(area.value());
        })
    };

    let on_save = {
        let (draft, errors) = (draft.clone(), errors.clone());
        let run = update.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_settings(&draft) {
                Ok(settings) => {
                    errors.set(FieldErrors::default());
                    run.emit(settings);
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    html! {
        <section class="resource-section">
            <h2>{"Settings"}</h2>
            if let (None, Some(error)) = (&settings.data, &settings.error) {
                <p class="table-error">{error_message(error)}</p>
            }
            <form class="settings-form" onsubmit={on_save}>
                <textarea rows="16" value={(*draft).clone()} {oninput} />
                {field_error(errors.get("settings"))}
                <button type="submit" class="btn-primary" disabled={update.loading || settings.data.is_none()}>
                    {"Save settings"}
                </button>
            </form>
        </section>
    }
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <section class="not-found">
            <h2>{"Page not found"}</h2>
            <Link<Route> to={Route::Dashboard}>{"Back to dashboard"}</Link<Route>>
        </section>
    }
}
