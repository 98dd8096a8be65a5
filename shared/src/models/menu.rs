//! Canonical menu model
//!
//! Menus flow one direction only (system → platform): the gateway formats
//! this flat category/product representation into each marketplace's
//! payload shape. There is no reverse conversion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    /// Whether the category is currently offered
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Menu product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category reference; categories must exist before their products
    pub category_id: String,
    /// Price in currency units (decimal, not minor units)
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Flat menu: categories plus products referencing them by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuData {
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
    #[serde(default)]
    pub products: Vec<MenuProduct>,
}

impl MenuData {
    /// Products belonging to the given category, in input order
    pub fn products_in(&self, category_id: &str) -> impl Iterator<Item = &MenuProduct> {
        self.products
            .iter()
            .filter(move |p| p.category_id == category_id)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.products.is_empty()
    }
}

impl Default for MenuCategory {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            sort_order: 0,
            available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_in_filters_by_category() {
        let menu = MenuData {
            categories: vec![MenuCategory {
                id: "cat-1".into(),
                name: "Burgers".into(),
                ..Default::default()
            }],
            products: vec![
                MenuProduct {
                    id: "p-1".into(),
                    name: "Cheeseburger".into(),
                    description: String::new(),
                    category_id: "cat-1".into(),
                    price: Decimal::new(2490, 2),
                    available: true,
                    image_url: None,
                },
                MenuProduct {
                    id: "p-2".into(),
                    name: "Fries".into(),
                    description: String::new(),
                    category_id: "cat-2".into(),
                    price: Decimal::new(990, 2),
                    available: true,
                    image_url: None,
                },
            ],
        };

        let in_cat1: Vec<_> = menu.products_in("cat-1").collect();
        assert_eq!(in_cat1.len(), 1);
        assert_eq!(in_cat1[0].id, "p-1");
    }
}
