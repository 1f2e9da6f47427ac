use super::{null_as_default, string_or_number, Media};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coaching / property-management offer ("accompagnement")
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(deserialize_with = "string_or_number")]
    pub order: Option<String>,
    /// Monthly price in euros
    pub price: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub characteristics: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Media>,
}
