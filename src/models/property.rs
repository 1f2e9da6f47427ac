use super::{null_as_default, Media};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Postal address of a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyAddress {
    pub id: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Rental price breakdown (euros)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyPrice {
    pub id: Option<String>,
    pub monthly_price: Option<f64>,
    pub charges_price: Option<f64>,
    pub dossier_price: Option<f64>,
    pub ensurence_deposit_price: Option<f64>,
    pub first_deposit_price: Option<f64>,
}

/// Free-form name/value attribute, e.g. `Chambres` -> `2`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Characteristic {
    pub id: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
}

impl Characteristic {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

/// Rental property listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub google_map_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_featured: bool,
    pub address: Option<PropertyAddress>,
    pub price: Option<PropertyPrice>,
    #[serde(deserialize_with = "null_as_default")]
    pub characteristics: Vec<Characteristic>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Media>,
}

impl Property {
    pub fn city(&self) -> Option<&str> {
        self.address.as_ref().and_then(|a| a.city.as_deref())
    }

    pub fn monthly_price(&self) -> Option<f64> {
        self.price.as_ref().and_then(|p| p.monthly_price)
    }

    /// A property is available until the backend soft-deletes it
    pub fn is_available(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_partial_payload() {
        let property: Property = serde_json::from_value(json!({
            "id": "p1",
            "title": "Studio",
            "description": null,
            "characteristics": null,
            "createdAt": "2025-06-02T21:01:11.976Z",
            "deletedAt": null
        }))
        .unwrap();

        assert_eq!(property.id, "p1");
        assert_eq!(property.description, "");
        assert!(property.characteristics.is_empty());
        assert!(property.price.is_none());
        assert!(property.created_at.is_some());
        assert!(property.is_available());
    }

    #[test]
    fn reads_nested_price_and_city() {
        let property: Property = serde_json::from_value(json!({
            "id": "p2",
            "address": { "city": "Poitiers", "postalCode": "86000" },
            "price": { "monthlyPrice": 650, "chargesPrice": 80 }
        }))
        .unwrap();

        assert_eq!(property.city(), Some("Poitiers"));
        assert_eq!(property.monthly_price(), Some(650.0));
    }

    #[test]
    fn soft_deleted_property_is_unavailable() {
        let property: Property = serde_json::from_value(json!({
            "id": "p3",
            "deletedAt": "2025-06-03T09:59:09.690Z"
        }))
        .unwrap();

        assert!(!property.is_available());
    }
}
