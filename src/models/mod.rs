use serde::{Deserialize, Deserializer, Serialize};

pub mod contact;
pub mod product;
pub mod property;
pub mod service;

pub use contact::{ContactAddress, ContactInfo};
pub use product::{Product, ProductType};
pub use property::{Characteristic, Property, PropertyAddress, PropertyPrice};
pub use service::Service;

/// Kind of catalogue entity served by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Property,
    Product,
    Service,
}


/// Image or video attached to an entity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    pub id: Option<String>,
    pub full_url: Option<String>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub place_holder: Option<String>,
    pub resource_type: Option<String>,
    /// Sort order, string-encoded by the backend
    #[serde(deserialize_with = "string_or_number")]
    pub order: Option<String>,
}

impl Media {
    /// URL of the media, if it carries a non-empty one
    pub fn url(&self) -> Option<&str> {
        self.full_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `"2"`, `2` or `null` for fields the backend sends as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => Some(text),
        Some(Raw::Number(number)) => Some(number.to_string()),
        Some(Raw::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_order_accepts_numbers_and_strings() {
        let media: Vec<Media> = serde_json::from_value(json!([
            { "fullUrl": "a", "order": "2" },
            { "fullUrl": "b", "order": 3 },
            { "fullUrl": "c", "order": null },
            { "fullUrl": "d" }
        ]))
        .unwrap();

        let orders: Vec<_> = media.iter().map(|m| m.order.as_deref()).collect();
        assert_eq!(orders, vec![Some("2"), Some("3"), None, None]);
    }

    #[test]
    fn media_url_ignores_empty_strings() {
        let media = Media {
            full_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(media.url(), None);
    }
}
