// Catálogo: productos, variantes, categorías, subcategorías.
// El modelo lo define la API; aquí solo los campos que muestra la consola,
// el resto se conserva en `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::TableRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub shop_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub shop_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(alias = "_id")]
    pub id: String,
    pub product_id: String,
    pub sku: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub category_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    /// Solo para subcategorías
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl TableRow for Product {
    const COLUMNS: &'static [&'static str] = &["Name", "Price", "Stock"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), format!("{:.2}", self.price), self.stock.to_string()]
    }
}

impl TableRow for Variant {
    const COLUMNS: &'static [&'static str] = &["SKU", "Price", "Stock"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.sku.clone(), format!("{:.2}", self.price), self.stock.to_string()]
    }
}

impl TableRow for Category {
    const COLUMNS: &'static [&'static str] = &["Name"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl TableRow for Subcategory {
    const COLUMNS: &'static [&'static str] = &["Name", "Category"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.category_id.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unknown_fields_and_mongo_ids() {
        let product: Product = serde_json::from_str(
            r#"{"_id":"p1","name":"Mug","price":9.5,"stock":3,"images":["a.png"]}"#,
        )
        .unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.extra["images"][0], "a.png");
        assert_eq!(product.cells(), vec!["Mug", "9.50", "3"]);
    }
}
