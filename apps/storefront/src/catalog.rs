//! # Product Catalog
//!
//! Read-only product lookup for the cart. Products come from a JSON file
//! (an array of catalog entries) or, in development, a built-in sample.
//!
//! ```json
//! [
//!   {
//!     "id": "maize-90kg",
//!     "name": "White Maize",
//!     "price": 4000,
//!     "category": "Grains & Cereals",
//!     "unit_of_measure": "90kg bag",
//!     "supplier": { "name": "Rift Valley Growers" }
//!   }
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;

use savannah_core::validation::validate_catalog;
use savannah_core::{Money, Product, Supplier, ValidationError};

/// Products by id, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog after validating every product.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate_catalog(&products)?;
        Ok(Self::indexed(products))
    }

    fn indexed(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Catalog { products, index }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// A handful of marketplace staples for local runs.
    pub fn sample() -> Self {
        let product = |id: &str,
                       name: &str,
                       price: i64,
                       category: &str,
                       unit: &str,
                       supplier: Option<&str>| Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_units(price),
            category: category.to_string(),
            unit_of_measure: unit.to_string(),
            supplier: supplier.map(|name| Supplier {
                name: name.to_string(),
            }),
        };

        let products = vec![
            product(
                "maize-90kg",
                "White Maize",
                4000,
                "Grains & Cereals",
                "90kg bag",
                Some("Rift Valley Growers"),
            ),
            product(
                "beans-50kg",
                "Rosecoco Beans",
                6500,
                "Legumes",
                "50kg bag",
                Some("Nyeri Farmers Co-op"),
            ),
            product(
                "dap-50kg",
                "DAP Fertiliser",
                3800,
                "Farm Inputs",
                "50kg bag",
                None,
            ),
            product(
                "milk-500ml",
                "Fresh Milk",
                60,
                "Dairy",
                "500ml pack",
                Some("Kiambu Dairy"),
            ),
            product(
                "tomato-crate",
                "Tomatoes",
                2500,
                "Fresh Produce",
                "crate",
                None,
            ),
        ];

        Self::indexed(products)
    }
}

/// Catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ValidationError),
}
