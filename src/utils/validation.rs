// Validación sintáctica de formularios (nunca llega a la red)

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::models::{AdminInput, CategoryInput, ProductInput, Role, Settings, ShopInput, VariantInput};

/// Errores por campo, en orden estable para renderizar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Forma mínima de un email: `local@dominio.tld`, sin espacios
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
                    .unwrap_or(false)
        }
        None => false,
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Enter a valid email address");
    }

    if password.is_empty() {
        errors.add("password", "Password is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn into_result<T>(errors: FieldErrors, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(errors)
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
    }
    value.to_string()
}

/// Número >= 0; si no, error en el campo y `default`
fn non_negative<T>(errors: &mut FieldErrors, field: &'static str, label: &str, raw: &str) -> T
where
    T: FromStr + PartialOrd + Default,
{
    if raw.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        return T::default();
    }
    match raw.trim().parse::<T>() {
        Ok(value) if value >= T::default() => value,
        Ok(_) => {
            errors.add(field, format!("{label} cannot be negative"));
            T::default()
        }
        Err(_) => {
            errors.add(field, format!("{label} must be a number"));
            T::default()
        }
    }
}

pub fn validate_product(name: &str, price: &str, stock: &str) -> Result<ProductInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = required(&mut errors, "name", "Name", name);
    let price = non_negative::<f64>(&mut errors, "price", "Price", price);
    let stock = non_negative::<i64>(&mut errors, "stock", "Stock", stock);

    into_result(errors, || ProductInput {
        name,
        price,
        stock,
        category_id: None,
        subcategory_id: None,
        shop_id: None,
        description: None,
    })
}

pub fn validate_variant(sku: &str, price: &str, stock: &str) -> Result<VariantInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let sku = required(&mut errors, "sku", "SKU", sku);
    let price = non_negative::<f64>(&mut errors, "price", "Price", price);
    let stock = non_negative::<i64>(&mut errors, "stock", "Stock", stock);

    into_result(errors, || VariantInput {
        sku,
        price,
        stock,
        attributes: Map::new(),
    })
}

/// El email del dueño es opcional, pero si viene tiene que ser válido
pub fn validate_shop(name: &str, owner_email: &str) -> Result<ShopInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = required(&mut errors, "name", "Name", name);
    let owner_email = owner_email.trim();
    if !owner_email.is_empty() && !is_valid_email(owner_email) {
        errors.add("owner_email", "Enter a valid email address");
    }

    into_result(errors, || ShopInput {
        name,
        owner_email: (!owner_email.is_empty()).then(|| owner_email.to_string()),
        active: true,
    })
}

/// Categoría (`parent` None) o subcategoría (`parent` obligatorio)
pub fn validate_category(name: &str, parent: Option<&str>) -> Result<CategoryInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = required(&mut errors, "name", "Name", name);
    let category_id = match parent {
        Some(parent) => Some(required(&mut errors, "category", "Category", parent)),
        None => None,
    };

    into_result(errors, || CategoryInput { name, category_id })
}

pub fn validate_admin(name: &str, email: &str, password: &str, role: Role) -> Result<AdminInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = required(&mut errors, "name", "Name", name);
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Enter a valid email address");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }

    into_result(errors, || AdminInput {
        name,
        email: email.trim().to_string(),
        role,
        password: Some(password.to_string()),
        shop_id: None,
    })
}

/// Los ajustes se editan como un objeto JSON
pub fn validate_settings(draft: &str) -> Result<Settings, FieldErrors> {
    match serde_json::from_str::<Map<String, Value>>(draft) {
        Ok(map) => Ok(Settings(map)),
        Err(e) => {
            let mut errors = FieldErrors::default();
            errors.add("settings", format!("Settings must be a JSON object: {e}"));
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("admin@shop.com"));
        assert!(is_valid_email("  ops.team@mail.shop.io "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "admin", "admin@", "@shop.com", "a@b", "a@@b.com", "a b@c.com", "a@.com", "a@b."] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn login_reports_each_field() {
        let errors = validate_login("nope", "").unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = validate_login("", "secret").unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), None);

        assert!(validate_login("admin@shop.com", "secret").is_ok());
    }

    #[test]
    fn product_form_reports_every_bad_field() {
        let errors = validate_product("  ", "abc", "-1").unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("price"), Some("Price must be a number"));
        assert_eq!(errors.get("stock"), Some("Stock cannot be negative"));

        let product = validate_product(" Mug ", "9.5", "3").unwrap();
        assert_eq!((product.name.as_str(), product.price, product.stock), ("Mug", 9.5, 3));
    }

    #[test]
    fn variant_form_requires_sku_and_numbers() {
        let errors = validate_variant("", "", "2.5").unwrap_err();
        assert_eq!(errors.get("sku"), Some("SKU is required"));
        assert_eq!(errors.get("price"), Some("Price is required"));
        assert_eq!(errors.get("stock"), Some("Stock must be a number"));
        assert!(validate_variant("MUG-RED", "10", "0").is_ok());
    }

    #[test]
    fn shop_owner_email_is_optional_but_checked() {
        assert_eq!(validate_shop("Store", "").unwrap().owner_email, None);
        let errors = validate_shop("Store", "owner@").unwrap_err();
        assert_eq!(errors.get("owner_email"), Some("Enter a valid email address"));
        assert_eq!(errors.get("name"), None);
    }

    #[test]
    fn subcategory_needs_a_parent_category() {
        assert_eq!(validate_category("Mugs", None).unwrap().category_id, None);
        let errors = validate_category("Mugs", Some("")).unwrap_err();
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(validate_category("Mugs", Some("c1")).unwrap().category_id.as_deref(), Some("c1"));
    }

    #[test]
    fn admin_form_checks_name_email_and_password() {
        let errors = validate_admin("", "ops", "", Role::Admin).unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let admin = validate_admin("Ops", " ops@shop.com ", "pw", Role::ShopAdmin).unwrap();
        assert_eq!(admin.email, "ops@shop.com");
        assert_eq!(admin.password.as_deref(), Some("pw"));
    }

    #[test]
    fn settings_must_be_a_json_object() {
        assert!(validate_settings(r#"{"currency":"EUR"}"#).is_ok());
        let errors = validate_settings("[1, 2]").unwrap_err();
        assert!(errors.get("settings").is_some_and(|m| m.starts_with("Settings must be a JSON object")));
    }
}
