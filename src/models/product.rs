use super::{null_as_default, Media};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Product category code as sent by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Book,
    #[default]
    Product,
    Formation,
    Tool,
    #[serde(other)]
    Unknown,
}

impl ProductType {
    /// Wire code, also used as the `type` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Book => "BOOK",
            ProductType::Product => "PRODUCT",
            ProductType::Formation => "FORMATION",
            ProductType::Tool => "TOOL",
            ProductType::Unknown => "UNKNOWN",
        }
    }

    /// French display label
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Book => "Livre",
            ProductType::Formation => "Formation",
            ProductType::Tool => "Outil",
            ProductType::Product | ProductType::Unknown => "Produit",
        }
    }
}

/// Book, training or tool sold through the shop
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub link: Option<String>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub product_type: ProductType,
    pub price: Option<f64>,
    /// Absolute amount taken off `price`
    #[serde(deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub characteristics: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Media>,
    #[serde(deserialize_with = "category_name")]
    pub category: Option<String>,
}

impl Product {
    /// Price actually charged at checkout
    pub fn final_price(&self) -> Option<f64> {
        self.price.map(|price| price - self.discount)
    }

    pub fn is_on_sale(&self) -> bool {
        self.discount > 0.0
    }
}

/// Categories arrive either as a plain name or as `{ id, name }`.
fn category_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Object { name: Option<String> },
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Name(name)) => Some(name),
        Some(Raw::Object { name }) => name,
        Some(Raw::Other(_)) | None => None,
    })
}
