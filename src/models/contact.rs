use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactAddress {
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
}

/// Company contact details shown in the footer and contact section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub id: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub whatsapp: Option<String>,
    pub google_map_url: Option<String>,
    pub address: Option<ContactAddress>,
    pub whats_app_groups: Vec<serde_json::Value>,
}
