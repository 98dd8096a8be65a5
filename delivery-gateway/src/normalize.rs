//! Order normalization — platform payload → canonical order
//!
//! One consolidated normalizer driven by the catalog's dotted field paths;
//! adapters contribute no extraction code of their own. Extraction is
//! defensive throughout: a missing field becomes `''`, zero or an empty
//! collection, never an error. Marketplace payloads drift, and a new
//! optional field must not break order ingestion.

use crate::catalog::{MoneyUnit, OrderSchema, PlatformConfig};
use crate::status::StatusMapper;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::order::{
    CanonicalOrder, DriverInfo, OrderCustomer, OrderDelivery, OrderItem, OrderItemOption,
    OrderPayment, OrderTotals,
};

/// Resolve a dotted path against a JSON value
///
/// Segments index into objects by key and into arrays by number
/// (`payments.methods.0.method`). An empty path resolves to the root.
pub(crate) fn path_value<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// String at path, `''` when absent or not scalar
pub(crate) fn path_str(root: &Value, path: &str) -> String {
    match path_value(root, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Monetary amount at path, zero when absent
pub(crate) fn path_money(root: &Value, path: &str, unit: MoneyUnit) -> Decimal {
    path_value(root, path)
        .map(|v| unit.from_wire(v))
        .unwrap_or(Decimal::ZERO)
}

/// Integer at path, zero when absent
pub(crate) fn path_i32(root: &Value, path: &str) -> i32 {
    match path_value(root, path) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) as i32,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Array at path, empty when absent
fn path_array<'a>(root: &'a Value, path: &str) -> &'a [Value] {
    match path_value(root, path) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

fn normalize_option(schema: &OrderSchema, unit: MoneyUnit, raw: &Value) -> OrderItemOption {
    OrderItemOption {
        name: path_str(raw, &schema.option_name),
        price: path_money(raw, &schema.option_price, unit),
    }
}

fn normalize_item(schema: &OrderSchema, unit: MoneyUnit, raw: &Value) -> OrderItem {
    OrderItem {
        name: path_str(raw, &schema.item_name),
        quantity: path_i32(raw, &schema.item_quantity),
        unit_price: path_money(raw, &schema.item_unit_price, unit),
        total: path_money(raw, &schema.item_total, unit),
        notes: path_str(raw, &schema.item_notes),
        options: path_array(raw, &schema.item_options)
            .iter()
            .map(|o| normalize_option(schema, unit, o))
            .collect(),
    }
}

/// Normalize a platform order payload into the canonical representation
///
/// The platform's own order id is always preserved as `external_id` so
/// the canonical record can be correlated back to its source.
pub fn normalize_order(config: &PlatformConfig, payload: &Value) -> CanonicalOrder {
    let schema = &config.order_schema;
    let unit = config.money_unit;
    let mapper = StatusMapper::new(&config.statuses);

    let driver_name = path_str(payload, &schema.driver_name);
    let driver_phone = path_str(payload, &schema.driver_phone);
    let driver = if driver_name.is_empty() && driver_phone.is_empty() {
        None
    } else {
        Some(DriverInfo {
            name: driver_name,
            phone: driver_phone,
        })
    };

    CanonicalOrder {
        platform: config.platform,
        external_id: path_str(payload, &schema.id),
        order_number: path_str(payload, &schema.order_number),
        status: mapper.to_canonical(&path_str(payload, &schema.status)),
        customer: OrderCustomer {
            name: path_str(payload, &schema.customer_name),
            phone: path_str(payload, &schema.customer_phone),
            email: path_str(payload, &schema.customer_email),
        },
        delivery: OrderDelivery {
            address: path_str(payload, &schema.delivery_address),
            fee: path_money(payload, &schema.delivery_fee, unit),
            estimated_time: path_str(payload, &schema.estimated_time),
            driver,
        },
        items: path_array(payload, &schema.items)
            .iter()
            .map(|item| normalize_item(schema, unit, item))
            .collect(),
        totals: OrderTotals {
            subtotal: path_money(payload, &schema.subtotal, unit),
            delivery_fee: path_money(payload, &schema.delivery_fee, unit),
            service_fee: path_money(payload, &schema.service_fee, unit),
            discount: path_money(payload, &schema.discount, unit),
            total: path_money(payload, &schema.total, unit),
        },
        payment: OrderPayment {
            method: path_str(payload, &schema.payment_method),
            status: path_str(payload, &schema.payment_status),
        },
        notes: path_str(payload, &schema.notes),
        created_at: path_str(payload, &schema.created_at),
    }
}
