//! Typed accessors over the free-form characteristic list attached to a property.
//!
//! The backend stores structured facts (bedrooms, surface, ...) as name/value
//! strings with no fixed vocabulary. Each canonical field owns a list of
//! aliases matched case-insensitively; accessors return the raw value or the
//! `N/A` sentinel and never fail on missing or malformed entries.

use crate::models::Characteristic;
use std::collections::HashMap;

/// Sentinel returned when a characteristic is absent
pub const NOT_AVAILABLE: &str = "N/A";

/// Values that mark a characteristic as "not present" when building badges
const FALSY_VALUES: &[&str] = &["non", "no", "false", "0", "0m²", "0 m²"];

/// Values that mark an amenity as absent
const NEGATIVE_VALUES: &[&str] = &["non", "no", "false"];

/// Names already rendered as dedicated fields, never as badges
const EXCLUDED_FEATURE_NAMES: &[&str] = &[
    "chambres",
    "chambre",
    "bedroom",
    "bedrooms",
    "surface",
    "superficie",
    "area",
    "pièces",
    "pieces",
    "rooms",
];

/// Canonical characteristic with its known aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicField {
    Bedrooms,
    Bathrooms,
    Area,
    Rooms,
}

impl CharacteristicField {
    /// Aliases in lookup order; the first alias with a value wins
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CharacteristicField::Bedrooms => &["Chambres", "Bedroom", "Chambre"],
            CharacteristicField::Bathrooms => {
                &["Salle de bain", "Salles de bain", "Bathroom", "Bathrooms"]
            }
            CharacteristicField::Area => &["Surface", "Area", "Superficie"],
            CharacteristicField::Rooms => &["Pièces", "Pieces", "Rooms"],
        }
    }

    pub fn lookup<'a>(&self, characteristics: &'a [Characteristic]) -> Option<&'a str> {
        find_by_aliases(characteristics, self.aliases())
    }
}

/// Value of the first characteristic named like one of `aliases`.
///
/// Aliases are tried in order. For each alias only the first characteristic
/// with that name is considered; an empty value falls through to the next alias.
pub fn find_by_aliases<'a>(characteristics: &'a [Characteristic], aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| find_one(characteristics, alias))
}

fn find_one<'a>(characteristics: &'a [Characteristic], name: &str) -> Option<&'a str> {
    let wanted = name.to_lowercase();
    characteristics
        .iter()
        .find(|c| {
            c.name
                .as_deref()
                .is_some_and(|n| !n.is_empty() && n.to_lowercase() == wanted)
        })
        .and_then(|c| c.value.as_deref())
        .filter(|v| !v.is_empty())
}

pub fn bed_count(characteristics: &[Characteristic]) -> String {
    CharacteristicField::Bedrooms
        .lookup(characteristics)
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Bathroom count; "oui"/"yes" means one bathroom
pub fn bath_count(characteristics: &[Characteristic]) -> String {
    match CharacteristicField::Bathrooms.lookup(characteristics) {
        None => NOT_AVAILABLE.to_string(),
        Some(value) => match value.to_lowercase().as_str() {
            "oui" | "yes" => "1".to_string(),
            _ => value.to_string(),
        },
    }
}

/// Surface in square meters, reduced to its first digit run ("45m²" -> "45")
pub fn area(characteristics: &[Characteristic]) -> String {
    match CharacteristicField::Area.lookup(characteristics) {
        None => NOT_AVAILABLE.to_string(),
        Some(value) => first_digit_run(value).unwrap_or(value).to_string(),
    }
}

pub fn room_count(characteristics: &[Characteristic]) -> String {
    CharacteristicField::Rooms
        .lookup(characteristics)
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// French apartment type: rooms first, then bedrooms + 1, else "Appartement"
pub fn derive_type(characteristics: &[Characteristic]) -> String {
    if let Some(rooms) = CharacteristicField::Rooms
        .lookup(characteristics)
        .and_then(parse_int_prefix)
    {
        return if rooms == 1 {
            "Studio".to_string()
        } else {
            format!("T{}", rooms)
        };
    }

    if let Some(beds) = CharacteristicField::Bedrooms
        .lookup(characteristics)
        .and_then(parse_int_prefix)
    {
        if beds == 0 {
            return "Studio".to_string();
        }
        if let Some(rooms) = beds.checked_add(1) {
            return format!("T{}", rooms);
        }
    }

    "Appartement".to_string()
}

/// Names of every other truthy characteristic, rendered as badges
pub fn feature_list(characteristics: &[Characteristic]) -> Vec<String> {
    characteristics
        .iter()
        .filter_map(|c| {
            let name = c.name.as_deref().filter(|n| !n.is_empty())?;
            let value = c.value.as_deref().filter(|v| !v.is_empty())?;
            Some((name, value))
        })
        .filter(|(_, value)| !FALSY_VALUES.contains(&value.to_lowercase().as_str()))
        .filter(|(name, _)| !EXCLUDED_FEATURE_NAMES.contains(&name.to_lowercase().as_str()))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Whether the named amenity is present and not explicitly negative
pub fn has_amenity(characteristics: &[Characteristic], amenity: &str) -> bool {
    match find_one(characteristics, amenity) {
        Some(value) => !NEGATIVE_VALUES.contains(&value.to_lowercase().as_str()),
        None => false,
    }
}

/// Name -> value map of complete entries; later duplicates win
pub fn characteristics_map(characteristics: &[Characteristic]) -> HashMap<String, String> {
    characteristics
        .iter()
        .filter_map(|c| match (c.name.as_deref(), c.value.as_deref()) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some((name.to_string(), value.to_string()))
            }
            _ => None,
        })
        .collect()
}

/// Leading integer of `text`, tolerating surrounding noise ("3 pièces" -> 3).
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
