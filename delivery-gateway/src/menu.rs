//! Menu formatting — canonical menu → platform payload
//!
//! One consolidated formatter parameterized by the catalog's menu schema;
//! concrete adapters contribute no formatting code of their own. Menus
//! flow one direction only (system → platform), so there is no parser
//! here.
//!
//! Formatting is deterministic: same canonical menu in, byte-identical
//! payload out. No timestamps, no generated ids, no map reordering.

use crate::catalog::{MenuSchema, MenuShape, MoneyUnit, PlatformConfig};
use serde_json::{Map, Value};
use shared::models::menu::{MenuCategory, MenuData, MenuProduct};
use shared::{GatewayError, GatewayResult};

/// Validate a canonical menu before any formatting or push
///
/// Catches the payloads every platform would reject anyway: empty names,
/// negative prices, products pointing at no category.
pub fn validate_menu(menu: &MenuData) -> GatewayResult<()> {
    if menu.is_empty() {
        return Err(GatewayError::invalid_payload("Menu is empty"));
    }
    for category in &menu.categories {
        if category.name.trim().is_empty() {
            return Err(
                GatewayError::invalid_payload("Category name is empty")
                    .with_detail("category_id", category.id.clone()),
            );
        }
    }
    for product in &menu.products {
        if product.name.trim().is_empty() {
            return Err(GatewayError::invalid_payload("Product name is empty")
                .with_detail("product_id", product.id.clone()));
        }
        if product.price.is_sign_negative() {
            return Err(GatewayError::invalid_payload("Product price is negative")
                .with_detail("product_id", product.id.clone()));
        }
        if product.category_id.trim().is_empty() {
            return Err(GatewayError::invalid_payload("Product has no category")
                .with_detail("product_id", product.id.clone()));
        }
    }
    Ok(())
}

/// Format a single category for a per-item push
pub fn format_category(schema: &MenuSchema, category: &MenuCategory) -> Value {
    let mut map = Map::new();
    map.insert(schema.id_field.clone(), Value::from(category.id.clone()));
    map.insert(schema.name_field.clone(), Value::from(category.name.clone()));
    map.insert(
        schema.sort_order_field.clone(),
        Value::from(category.sort_order),
    );
    map.insert(
        schema.available_field.clone(),
        Value::from(category.available),
    );
    Value::Object(map)
}

/// Format a single product for a per-item push
///
/// The category reference is always present: platforms require the
/// category to exist before a product can point at it, which is why
/// adapters push categories first.
pub fn format_product(schema: &MenuSchema, money: MoneyUnit, product: &MenuProduct) -> Value {
    let mut map = Map::new();
    map.insert(schema.id_field.clone(), Value::from(product.id.clone()));
    map.insert(schema.name_field.clone(), Value::from(product.name.clone()));
    map.insert(
        schema.description_field.clone(),
        Value::from(product.description.clone()),
    );
    map.insert(schema.price_field.clone(), money.to_wire(product.price));
    map.insert(
        schema.available_field.clone(),
        Value::from(product.available),
    );
    map.insert(
        schema.category_ref_field.clone(),
        Value::from(product.category_id.clone()),
    );
    if let Some(image_url) = &product.image_url {
        map.insert("image_url".to_string(), Value::from(image_url.clone()));
    }
    Value::Object(map)
}

/// Format the whole menu as one document
///
/// Nested platforms get products inside their category objects; parallel
/// platforms get two flat arrays with a category reference per product.
pub fn format_menu(config: &PlatformConfig, menu: &MenuData) -> GatewayResult<Value> {
    validate_menu(menu)?;
    let schema = &config.menu_schema;
    let money = config.money_unit;

    let payload = match schema.shape {
        MenuShape::Nested => {
            let categories: Vec<Value> = menu
                .categories
                .iter()
                .map(|category| {
                    let mut object = match format_category(schema, category) {
                        Value::Object(map) => map,
                        _ => unreachable!(),
                    };
                    let products: Vec<Value> = menu
                        .products_in(&category.id)
                        .map(|p| format_product(schema, money, p))
                        .collect();
                    object.insert(schema.products_field.clone(), Value::Array(products));
                    Value::Object(object)
                })
                .collect();

            let mut root = Map::new();
            root.insert(schema.categories_field.clone(), Value::Array(categories));
            Value::Object(root)
        }
        MenuShape::Parallel => {
            let categories: Vec<Value> = menu
                .categories
                .iter()
                .map(|c| format_category(schema, c))
                .collect();
            let products: Vec<Value> = menu
                .products
                .iter()
                .map(|p| format_product(schema, money, p))
                .collect();

            let mut root = Map::new();
            root.insert(schema.categories_field.clone(), Value::Array(categories));
            root.insert(schema.products_field.clone(), Value::Array(products));
            Value::Object(root)
        }
    };

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlatformCatalog;
    use rust_decimal::Decimal;
    use serde_json::json;
    use shared::{ErrorCode, Platform};

    fn sample_menu() -> MenuData {
        MenuData {
            categories: vec![
                MenuCategory {
                    id: "cat-1".into(),
                    name: "Burgers".into(),
                    sort_order: 1,
                    available: true,
                },
                MenuCategory {
                    id: "cat-2".into(),
                    name: "Drinks".into(),
                    sort_order: 2,
                    available: false,
                },
            ],
            products: vec![
                MenuProduct {
                    id: "p-1".into(),
                    name: "Cheeseburger".into(),
                    description: "House classic".into(),
                    category_id: "cat-1".into(),
                    price: Decimal::new(2490, 2), // 24.90
                    available: true,
                    image_url: None,
                },
                MenuProduct {
                    id: "p-2".into(),
                    name: "Lemonade".into(),
                    description: String::new(),
                    category_id: "cat-2".into(),
                    price: Decimal::new(990, 2), // 9.90
                    available: true,
                    image_url: None,
                },
            ],
        }
    }

    fn config(platform: Platform) -> PlatformConfig {
        PlatformCatalog::builtin().config(platform).unwrap().clone()
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let menu = sample_menu();
        for platform in Platform::ALL {
            let config = config(platform);
            let first = format_menu(&config, &menu).unwrap();
            let second = format_menu(&config, &menu).unwrap();
            assert_eq!(first, second, "{platform} formatting not stable");
        }
    }

    #[test]
    fn test_nested_shape_groups_products_under_categories() {
        let config = config(Platform::Rappi);
        let payload = format_menu(&config, &sample_menu()).unwrap();

        let categories = payload["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0]["name"], "Burgers");
        assert_eq!(categories[0]["products"][0]["name"], "Cheeseburger");
        assert_eq!(categories[1]["products"].as_array().unwrap().len(), 1);
        // Availability flags carried through
        assert_eq!(categories[1]["is_available"], json!(false));
    }

    #[test]
    fn test_parallel_shape_links_products_by_reference() {
        let config = config(Platform::UberEats);
        let payload = format_menu(&config, &sample_menu()).unwrap();

        assert_eq!(payload["categories"].as_array().unwrap().len(), 2);
        let items = payload["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Cheeseburger");
        assert_eq!(items[0]["category_id"], "cat-1");
    }

    #[test]
    fn test_money_rescaled_per_platform_unit() {
        let menu = sample_menu();

        // Uber Eats counts in cents
        let uber = format_product(
            &config(Platform::UberEats).menu_schema,
            MoneyUnit::Cents,
            &menu.products[0],
        );
        assert_eq!(uber["price"], json!(2490));

        // iFood takes decimal currency units
        let ifood = format_product(
            &config(Platform::IFood).menu_schema,
            MoneyUnit::Decimal,
            &menu.products[0],
        );
        assert_eq!(ifood["price"], json!(24.9));
    }

    #[test]
    fn test_validate_rejects_bad_menus() {
        let empty = MenuData::default();
        assert_eq!(
            validate_menu(&empty).unwrap_err().code,
            ErrorCode::InvalidPayload
        );

        let mut negative = sample_menu();
        negative.products[0].price = Decimal::new(-100, 2);
        assert_eq!(
            validate_menu(&negative).unwrap_err().code,
            ErrorCode::InvalidPayload
        );

        let mut unnamed = sample_menu();
        unnamed.categories[0].name = "  ".into();
        assert!(validate_menu(&unnamed).is_err());
    }
}
