use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ORDER_TYPE: &str = "Dine In";

/// Order types offered as filter tabs when nothing else is configured.
pub const DEFAULT_ORDER_TYPES: [&str; 3] = ["Dine In", "Takeaway", "Delivery"];

/// A recorded order after load-time normalization.
///
/// Every string field is present; fields missing from the stored record are
/// empty, and a missing `orderType` is [`DEFAULT_ORDER_TYPE`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub created_at: String,
    pub order_type: String,
    pub table_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub items: Vec<OrderItem>,
    pub total: Total,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: String,
}

/// The stored `total`, kept in whichever shape it was written.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Total {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Total {
    /// Numeric value used for aggregation. `None` when the stored value is
    /// missing, not a number, or not finite.
    pub fn amount(&self) -> Option<f64> {
        let value = match self {
            Total::Number(n) => *n,
            Total::Text(s) => s.trim().parse::<f64>().ok()?,
            Total::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Total::Number(n) => write!(f, "{n}"),
            Total::Text(s) => f.write_str(s),
            Total::Missing => Ok(()),
        }
    }
}

/// An order record exactly as decoded from the store, before defaults are
/// applied. Scalar fields stay loosely typed so that legacy records written
/// with numbers where strings are expected still load.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredOrder {
    pub order_id: Option<Value>,
    pub created_at: Option<Value>,
    pub order_type: Option<Value>,
    pub table_number: Option<Value>,
    pub customer_name: Option<Value>,
    pub customer_phone: Option<Value>,
    pub delivery_address: Option<Value>,
    pub items: Option<Value>,
    pub total: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct StoredItem {
    name: Option<Value>,
    quantity: Option<Value>,
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn decode_items(value: Option<&Value>) -> Vec<OrderItem> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<StoredItem>(entry.clone()).ok())
        .map(|item| OrderItem {
            name: value_text(item.name.as_ref()),
            quantity: value_text(item.quantity.as_ref()),
        })
        .collect()
}

fn decode_total(value: Option<&Value>) -> Total {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(Total::Number).unwrap_or_default(),
        Some(Value::String(s)) => Total::Text(s.clone()),
        _ => Total::Missing,
    }
}

impl StoredOrder {
    /// Apply the legacy-record defaults and produce an [`Order`].
    pub fn normalize(&self) -> Order {
        let mut order_type = value_text(self.order_type.as_ref());
        if order_type.is_empty() {
            order_type = DEFAULT_ORDER_TYPE.to_string();
        }
        Order {
            order_id: value_text(self.order_id.as_ref()),
            created_at: value_text(self.created_at.as_ref()),
            order_type,
            table_number: value_text(self.table_number.as_ref()),
            customer_name: value_text(self.customer_name.as_ref()),
            customer_phone: value_text(self.customer_phone.as_ref()),
            delivery_address: value_text(self.delivery_address.as_ref()),
            items: decode_items(self.items.as_ref()),
            total: decode_total(self.total.as_ref()),
        }
    }
}
