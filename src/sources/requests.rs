//! Payloads the site sends to the backend: interest requests and checkout orders.

use crate::error::{CatalogError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles");

    // French numbers: +33 or 0, then nine digits, first one non-zero
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^(?:\+33|0)[1-9][0-9]{8}$").expect("phone pattern compiles");
}

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

/// What an interest request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestKind {
    Property,
    Service,
}

impl InterestKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            InterestKind::Property => "/property-request",
            InterestKind::Service => "/accompagniement-request",
        }
    }

    fn id_field(&self) -> &'static str {
        match self {
            InterestKind::Property => "propertyId",
            InterestKind::Service => "accompaniementId",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            InterestKind::Property => {
                "Bonjour, je suis intéressé(e) par ce bien. Pourriez-vous m'envoyer sa fiche détaillée ?"
            }
            InterestKind::Service => {
                "Bonjour, je souhaiterais en savoir plus sur vos services d'accompagnement."
            }
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            InterestKind::Property => {
                "Merci de votre confiance. Un conseiller vous rappellera sous 24 h."
            }
            InterestKind::Service => {
                "Merci pour votre demande. Notre équipe vous contactera rapidement."
            }
        }
    }
}

/// Contact form for a property or a service
#[derive(Debug, Clone, PartialEq)]
pub struct InterestRequest {
    pub kind: InterestKind,
    pub target_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
}

impl InterestRequest {
    /// Empty form pre-filled with the default message for `kind`
    pub fn new(kind: InterestKind, target_id: impl Into<String>) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            message: kind.default_message().to_string(),
        }
    }

    /// Field -> message for every invalid field
    pub fn field_errors(&self) -> Vec<(&'static str, &'static str)> {
        let mut errors = Vec::new();

        if let Some(msg) = check_name(&self.first_name, "Le prénom est requis") {
            errors.push(("firstName", msg));
        }
        if let Some(msg) = check_name(&self.last_name, "Le nom est requis") {
            errors.push(("lastName", msg));
        }
        if self.email.trim().is_empty() {
            errors.push(("email", "L'e-mail est requis"));
        } else if !is_valid_email(self.email.trim()) {
            errors.push(("email", "Adresse e-mail invalide"));
        }
        if self.phone_number.trim().is_empty() {
            errors.push(("phoneNumber", "Le téléphone est requis"));
        } else if !is_valid_french_phone(self.phone_number.trim()) {
            errors.push(("phoneNumber", "Numéro français invalide"));
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        validation_result(self.field_errors())
    }

    /// JSON body, with the target id under the field the endpoint expects
    pub fn payload(&self) -> Value {
        let mut body = json!({
            "firstName": self.first_name.trim(),
            "lastName": self.last_name.trim(),
            "email": self.email.trim(),
            "phoneNumber": self.phone_number.trim(),
            "message": self.message,
        });
        body[self.kind.id_field()] = Value::String(self.target_id.clone());
        body
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Buyer details sent when opening a checkout session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: OrderAddress,
}

impl OrderRequest {
    pub fn field_errors(&self) -> Vec<(&'static str, &'static str)> {
        let required = [
            ("firstName", &self.first_name, "Le prénom est requis"),
            ("lastName", &self.last_name, "Le nom est requis"),
            ("phoneNumber", &self.phone_number, "Le téléphone est requis"),
            ("address.street", &self.address.street, "L'adresse est requise"),
            ("address.city", &self.address.city, "La ville est requise"),
            ("address.postalCode", &self.address.postal_code, "Le code postal est requis"),
            ("address.country", &self.address.country, "Le pays est requis"),
        ];

        let mut errors: Vec<_> = required
            .iter()
            .filter(|(_, value, _)| value.trim().is_empty())
            .map(|(field, _, msg)| (*field, *msg))
            .collect();

        if self.email.trim().is_empty() {
            errors.push(("email", "L'e-mail est requis"));
        } else if !is_valid_email(self.email.trim()) {
            errors.push(("email", "Adresse e-mail invalide"));
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        validation_result(self.field_errors())
    }
}

/// Payment-provider session, passed through as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_french_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

fn check_name(name: &str, required: &'static str) -> Option<&'static str> {
    let len = name.trim().chars().count();
    if len == 0 {
        Some(required)
    } else if len < NAME_MIN {
        Some("Au moins 2 caractères")
    } else if len > NAME_MAX {
        Some("Max. 50 caractères")
    } else {
        None
    }
}

fn validation_result(errors: Vec<(&'static str, &'static str)>) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|(_, msg)| *msg)
        .collect::<Vec<_>>()
        .join("; ");
    Err(CatalogError::Validation(message))
}
