//! Static product catalog with conjunctive multi-field filtering.

use serde::Deserialize;

use parley_core::types::Product;

/// Read-only product catalog, seeded at construction.
pub struct Catalog {
    products: Vec<Product>,
}

/// Optional filters for [`Catalog::list`]. All supplied filters must match
/// (AND semantics). `max_price` accepts any JSON value; non-numeric values
/// are silently ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub max_price: Option<serde_json::Value>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub text: Option<String>,
}

impl ProductFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.max_price.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.text.is_none()
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// All products, in declaration order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Products matching every supplied filter, preserving declaration order.
    pub fn list(&self, filters: &ProductFilters) -> Vec<Product> {
        let mut results: Vec<&Product> = self.products.iter().collect();
        if filters.is_empty() {
            return results.into_iter().cloned().collect();
        }

        if let Some(category) = &filters.category {
            results.retain(|p| &p.category == category);
        }
        // Tolerate "1500", 1500 and 1500.0; anything else skips the filter.
        if let Some(max_price) = &filters.max_price {
            if let Some(maxp) = as_number(max_price) {
                results.retain(|p| p.price <= maxp);
            }
        }
        if let Some(color) = &filters.color {
            let color = color.to_lowercase();
            results.retain(|p| p.color.to_lowercase() == color);
        }
        if let Some(size) = &filters.size {
            let size = size.to_uppercase();
            results.retain(|p| p.sizes.iter().any(|s| s.to_uppercase() == size));
        }
        if let Some(text) = &filters.text {
            let q = text.to_lowercase();
            results.retain(|p| {
                p.name.to_lowercase().contains(&q) || p.description.to_lowercase().contains(&q)
            });
        }

        results.into_iter().cloned().collect()
    }
}

fn as_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn seed_products() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        description: &str,
        price: f64,
        category: &str,
        color: &str,
        sizes: &[&str],
    ) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            currency: "INR".into(),
            category: category.into(),
            color: color.into(),
            sizes: sizes.iter().map(|s| s.to_string()).collect(),
        }
    }

    let apparel = ["S", "M", "L", "XL"];
    vec![
        product("mug-001", "Stoneware Coffee Mug", "12oz white stoneware mug", 800.0, "mug", "white", &[]),
        product("mug-002", "Blue Ceramic Mug", "12oz ceramic mug in deep blue", 850.0, "mug", "blue", &[]),
        product("tee-001", "Classic Tee", "Cotton t-shirt, unisex", 699.0, "tshirt", "black", &apparel),
        product("hoodie-001", "Pullover Hoodie", "Warm fleece hoodie", 1499.0, "hoodie", "black", &apparel),
        product("hoodie-002", "Zip Hoodie", "Full-zip hoodie, gray", 1699.0, "hoodie", "gray", &apparel),
        product("cap-001", "Baseball Cap", "Adjustable cap", 399.0, "cap", "navy", &[]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_returns_full_catalog_in_order() {
        let catalog = Catalog::seeded();
        let all = catalog.list(&ProductFilters::default());
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, "mug-001");
        assert_eq!(all[5].id, "cap-001");
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let catalog = Catalog::seeded();
        let filters = ProductFilters {
            category: Some("hoodie".into()),
            max_price: Some(serde_json::json!(1500)),
            ..Default::default()
        };
        let results = catalog.list(&filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "hoodie-001");
    }

    #[test]
    fn test_every_result_satisfies_every_predicate() {
        let catalog = Catalog::seeded();
        let filters = ProductFilters {
            color: Some("BLACK".into()),
            max_price: Some(serde_json::json!("1500")),
            ..Default::default()
        };
        for p in catalog.list(&filters) {
            assert_eq!(p.color.to_lowercase(), "black");
            assert!(p.price <= 1500.0);
        }
    }

    #[test]
    fn test_non_numeric_max_price_is_ignored() {
        let catalog = Catalog::seeded();
        let filters = ProductFilters {
            max_price: Some(serde_json::json!("cheap")),
            ..Default::default()
        };
        assert_eq!(catalog.list(&filters).len(), 6);
    }

    #[test]
    fn test_size_membership_is_case_insensitive() {
        let catalog = Catalog::seeded();
        let filters = ProductFilters {
            size: Some("xl".into()),
            ..Default::default()
        };
        let results = catalog.list(&filters);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|p| p.sizes.contains(&"XL".to_string())));
    }

    #[test]
    fn test_text_matches_name_or_description() {
        let catalog = Catalog::seeded();
        let filters = ProductFilters {
            text: Some("Fleece".into()),
            ..Default::default()
        };
        let results = catalog.list(&filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "hoodie-001");
    }
}
