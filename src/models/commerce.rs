// Pedidos, pagos, clientes y tiendas

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::TableRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopInput {
    pub name: String,
    pub owner_email: Option<String>,
    pub active: bool,
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

impl TableRow for Order {
    const COLUMNS: &'static [&'static str] = &["Order", "Customer", "Total", "Status", "Created"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            or_dash(&self.customer_name),
            format!("{:.2}", self.total),
            self.status.label().to_string(),
            or_dash(&self.created_at),
        ]
    }
}

impl TableRow for Payment {
    const COLUMNS: &'static [&'static str] = &["Payment", "Order", "Amount", "Method", "Status"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            or_dash(&self.order_id),
            format!("{:.2}", self.amount),
            or_dash(&self.method),
            or_dash(&self.status),
        ]
    }
}

impl TableRow for Customer {
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Phone"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), or_dash(&self.phone)]
    }
}

impl TableRow for Shop {
    const COLUMNS: &'static [&'static str] = &["Name", "Owner", "Active"];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.owner_email),
            if self.active { "Yes" } else { "No" }.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_order_status_does_not_fail_the_list() {
        let order: Order = serde_json::from_str(r#"{"id":"o1","status":"refunded","total":12}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.cells()[3], "Unknown");
        assert_eq!(order.cells()[1], "—");
    }
}
