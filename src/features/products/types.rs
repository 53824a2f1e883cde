//! Request and response types for the product API.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_PAGE_SIZE: u32 = 8;
pub const DEFAULT_SORT: &str = "id";

/// The fixed set of product categories, serialized with their display names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home & Kitchen")]
    HomeAndKitchen,
    Sports,
    Toys,
    Beauty,
    Automotive,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::HomeAndKitchen,
        Category::Sports,
        Category::Toys,
        Category::Beauty,
        Category::Automotive,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::HomeAndKitchen => "Home & Kitchen",
            Category::Sports => "Sports",
            Category::Toys => "Toys",
            Category::Beauty => "Beauty",
            Category::Automotive => "Automotive",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive; `home-and-kitchen` and `home & kitchen` both match.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(value);
        Category::ALL
            .into_iter()
            .find(|category| normalize(category.as_str()) == wanted)
            .ok_or_else(|| format!("unknown category: {}", value.trim()))
    }
}

fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .replace("and", "&")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '&')
        .collect()
}

/// A catalog product as returned by the API. The server stores any
/// non-blank category, so reads keep it as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock_quantity: i64,
    pub image_url: String,
}

/// Body of create and update requests. It has no `id` (assigned by the
/// server) and no currency (fixed server-side).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub stock_quantity: i64,
    pub image_url: String,
}

impl Product {
    /// The category if it is one of [`Category::ALL`], matched on the exact
    /// display name.
    #[must_use]
    pub fn known_category(&self) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == self.category)
    }
}

/// One page of a larger result set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
    pub last: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Paging parameters for the unfiltered product list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT.to_string(),
        }
    }
}

impl ListParams {
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_round_trips_display_names() {
        let value = serde_json::to_value(Category::HomeAndKitchen).unwrap();
        assert_eq!(value, json!("Home & Kitchen"));
        let parsed: Category = serde_json::from_value(json!("Books")).unwrap();
        assert_eq!(parsed, Category::Books);
    }

    #[test]
    fn category_parses_cli_input() {
        assert_eq!("books".parse::<Category>(), Ok(Category::Books));
        assert_eq!("Home & Kitchen".parse::<Category>(), Ok(Category::HomeAndKitchen));
        assert_eq!("home-and-kitchen".parse::<Category>(), Ok(Category::HomeAndKitchen));
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn product_uses_camel_case() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Lamp",
            "description": "A warm desk lamp",
            "price": 19.99,
            "category": "Home & Kitchen",
            "stockQuantity": 4,
            "imageUrl": "https://img.example/lamp.png"
        }))
        .unwrap();
        assert_eq!(product.id, Some(3));
        assert_eq!(product.stock_quantity, 4);
        assert_eq!(product.category, "Home & Kitchen");
        assert_eq!(product.known_category(), Some(Category::HomeAndKitchen));
    }

    #[test]
    fn product_keeps_unknown_category() {
        let product: Product = serde_json::from_value(json!({
            "id": 9,
            "name": "Rake",
            "description": "A wide garden rake",
            "price": 24.0,
            "category": "Garden",
            "stockQuantity": 1,
            "imageUrl": "https://img.example/rake.png"
        }))
        .unwrap();
        assert_eq!(product.category, "Garden");
        assert_eq!(product.known_category(), None);
    }

    #[test]
    fn payload_has_no_id_or_currency() {
        let payload = ProductPayload {
            name: "Lamp".to_string(),
            description: "A warm desk lamp".to_string(),
            price: 19.99,
            category: Category::HomeAndKitchen,
            stock_quantity: 4,
            image_url: "https://img.example/lamp.png".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("currency"));
        assert!(!object.contains_key("id"));
        assert_eq!(object.get("stockQuantity"), Some(&json!(4)));
    }

    #[test]
    fn page_ignores_extra_spring_fields() {
        let page: Page<Product> = serde_json::from_value(json!({
            "content": [],
            "totalElements": 0,
            "totalPages": 0,
            "number": 0,
            "size": 8,
            "last": true,
            "first": true,
            "pageable": {"pageNumber": 0}
        }))
        .unwrap();
        assert!(page.is_empty());
        assert!(page.last);
    }

    #[test]
    fn list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 8);
        assert_eq!(params.sort_by, "id");
        assert_eq!(ListParams::page(3).page, 3);
    }
}
