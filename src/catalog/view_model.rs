//! Display-ready projections of catalogue entities.
//!
//! Every builder here is total: partially populated entities degrade to the
//! French fallback strings shown on the site instead of failing.

use super::characteristics::{self, parse_int_prefix};
use crate::models::{Media, Product, Property, Service};
use serde::Serialize;

pub const PROPERTY_PLACEHOLDER: &str = "/placeholder.svg?height=300&width=400&text=No+Image";
pub const CARD_PLACEHOLDER: &str = "/placeholder.svg?height=240&width=360&text=No+Image";

const DEFAULT_SLUG: &str = "property-details";
const FREE_LABEL: &str = "Gratuit";

/// Property as rendered on listing cards and the detail page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyViewModel {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub monthly_price: String,
    pub charges: String,
    pub deposit: String,
    pub application_fees: String,
    pub total_monthly_cost: String,
    pub full_address: String,
    pub short_address: String,
    pub main_image: String,
    pub images: Vec<String>,
    pub beds: String,
    pub baths: String,
    pub area: String,
    pub rooms: String,
    pub property_type: String,
    pub features: Vec<String>,
    pub is_featured: bool,
    pub is_available: bool,
}

impl PropertyViewModel {
    pub fn build(property: &Property) -> Self {
        let chars = &property.characteristics;
        Self {
            id: property.id.clone(),
            slug: slugify(&property.title),
            title: property.title.clone(),
            description: property.description.clone(),
            monthly_price: format_monthly_price(property),
            charges: format_charges(property),
            deposit: format_deposit(property),
            application_fees: format_application_fees(property),
            total_monthly_cost: format_total_monthly_cost(property),
            full_address: full_address(property),
            short_address: short_address(property),
            main_image: main_image(&property.images, PROPERTY_PLACEHOLDER),
            images: all_images(&property.images),
            beds: characteristics::bed_count(chars),
            baths: characteristics::bath_count(chars),
            area: characteristics::area(chars),
            rooms: characteristics::room_count(chars),
            property_type: characteristics::derive_type(chars),
            features: characteristics::feature_list(chars),
            is_featured: property.is_featured,
            is_available: property.is_available(),
        }
    }
}

/// Product card: discounted price, badge and checkout eligibility
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductViewModel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub type_label: String,
    pub price: String,
    /// Crossed-out price, only when a discount applies
    pub original_price: Option<String>,
    pub on_sale: bool,
    pub main_image: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub is_featured: bool,
    pub can_checkout: bool,
}

impl ProductViewModel {
    pub fn build(product: &Product) -> Self {
        let final_price = product.final_price();
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            type_label: product.product_type.label().to_string(),
            price: match final_price {
                Some(price) => format_product_price(price),
                None => "Prix non disponible".to_string(),
            },
            original_price: match product.price {
                Some(price) if product.is_on_sale() => Some(format_product_price(price)),
                _ => None,
            },
            on_sale: product.is_on_sale(),
            main_image: main_image(&product.images, CARD_PLACEHOLDER),
            images: all_images(&product.images),
            features: product.characteristics.clone(),
            is_featured: product.is_featured,
            can_checkout: final_price.is_some_and(|price| price > 0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceViewModel {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub price: String,
    pub main_image: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
}

impl ServiceViewModel {
    pub fn build(service: &Service) -> Self {
        Self {
            id: service.id.clone(),
            title: service.title.clone(),
            short_description: service.short_description.clone(),
            price: match service.price {
                Some(price) => format!("{}€/mois", format_amount(price)),
                None => "Prix non disponible".to_string(),
            },
            main_image: main_image(&service.images, CARD_PLACEHOLDER),
            images: all_images(&service.images),
            features: service.characteristics.clone(),
        }
    }
}

pub fn format_monthly_price(property: &Property) -> String {
    price_field(property, |p| p.monthly_price)
        .map(|n| format!("{}€/mois", format_amount(n)))
        .unwrap_or_else(|| "Prix non disponible".to_string())
}

pub fn format_charges(property: &Property) -> String {
    price_field(property, |p| p.charges_price)
        .map(|n| format!("{}€/mois", format_amount(n)))
        .unwrap_or_else(|| "Charges non disponibles".to_string())
}

pub fn format_deposit(property: &Property) -> String {
    price_field(property, |p| p.first_deposit_price)
        .map(|n| format!("{}€", format_amount(n)))
        .unwrap_or_else(|| "Dépôt non disponible".to_string())
}

pub fn format_application_fees(property: &Property) -> String {
    price_field(property, |p| p.dossier_price)
        .map(|n| format!("{}€", format_amount(n)))
        .unwrap_or_else(|| "Frais non disponibles".to_string())
}

/// Rent plus charges; zero when the price is unknown
pub fn total_monthly_cost(property: &Property) -> f64 {
    match &property.price {
        Some(price) => price.monthly_price.unwrap_or(0.0) + price.charges_price.unwrap_or(0.0),
        None => 0.0,
    }
}

pub fn format_total_monthly_cost(property: &Property) -> String {
    let total = total_monthly_cost(property);
    if total != 0.0 {
        format!("{}€/mois (tout compris)", format_amount(total))
    } else {
        "Coût total non disponible".to_string()
    }
}

pub fn full_address(property: &Property) -> String {
    let Some(address) = &property.address else {
        return "Adresse non disponible".to_string();
    };

    join_present(&[
        &address.address_line1,
        &address.city,
        &address.postal_code,
        &address.country,
    ])
    .unwrap_or_else(|| "Adresse incomplète".to_string())
}

pub fn short_address(property: &Property) -> String {
    let Some(address) = &property.address else {
        return "Localisation non disponible".to_string();
    };

    join_present(&[&address.city, &address.postal_code])
        .unwrap_or_else(|| "Localisation incomplète".to_string())
}

/// URL of the lowest-ordered media item that has one
pub fn main_image(images: &[Media], placeholder: &str) -> String {
    sorted_media(images)
        .first()
        .and_then(|m| m.url())
        .unwrap_or(placeholder)
        .to_string()
}

/// Every media URL, in display order
pub fn all_images(images: &[Media]) -> Vec<String> {
    sorted_media(images)
        .into_iter()
        .filter_map(|m| m.url())
        .map(str::to_string)
        .collect()
}

/// Parsed display order of a media item or service; unparsable orders sort as 0
pub fn sort_order(order: Option<&str>) -> i64 {
    order.and_then(parse_int_prefix).unwrap_or(0)
}

fn sorted_media(images: &[Media]) -> Vec<&Media> {
    let mut usable: Vec<&Media> = images.iter().filter(|m| m.url().is_some()).collect();
    usable.sort_by_key(|m| sort_order(m.order.as_deref()));
    usable
}

/// Services in their configured display order (stable)
pub fn sort_services_by_order(services: &[Service]) -> Vec<Service> {
    let mut sorted = services.to_vec();
    sorted.sort_by_key(|s| sort_order(s.order.as_deref()));
    sorted
}

/// URL slug for a title: French accents folded, punctuation collapsed to dashes
pub fn slugify(title: &str) -> String {
    if title.is_empty() {
        return DEFAULT_SLUG.to_string();
    }

    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        let folded = match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        };

        if folded.is_ascii_lowercase() || folded.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(folded);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Euro amount without a trailing `.0` for whole numbers
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.is_finite() {
        format!("{:.0}", amount)
    } else {
        format!("{}", amount)
    }
}

/// Shop price rounded to the cent; nothing to pay reads "Gratuit"
pub fn format_product_price(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    if cents <= 0.0 {
        return FREE_LABEL.to_string();
    }
    format!("{}€", format_amount(cents))
}

fn price_field(property: &Property, field: impl Fn(&crate::models::PropertyPrice) -> Option<f64>) -> Option<f64> {
    property.price.as_ref().and_then(field)
}

fn join_present(parts: &[&Option<String>]) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.is_empty())
        .collect();

    if present.is_empty() {
        None
    } else {
        Some(present.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Characteristic, PropertyAddress, PropertyPrice};

    fn media(order: Option<&str>, url: Option<&str>) -> Media {
        Media {
            order: order.map(str::to_string),
            full_url: url.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample_property() -> Property {
        Property {
            id: "p1".to_string(),
            title: "Appartement T2 moderne - Centre Poitiers".to_string(),
            address: Some(PropertyAddress {
                address_line1: Some("11 rue Raoul Follereau".to_string()),
                city: Some("Poitiers".to_string()),
                postal_code: Some("86000".to_string()),
                country: Some("France".to_string()),
                ..Default::default()
            }),
            price: Some(PropertyPrice {
                monthly_price: Some(650.0),
                charges_price: Some(80.0),
                dossier_price: Some(210.0),
                first_deposit_price: Some(650.0),
                ..Default::default()
            }),
            characteristics: vec![
                Characteristic::new("Surface", "45m²"),
                Characteristic::new("Pièces", "2"),
                Characteristic::new("Chambres", "1"),
                Characteristic::new("Salle de bain", "1"),
                Characteristic::new("Balcon", "Oui"),
            ],
            images: vec![
                media(Some("1"), Some("https://cdn/b.jpg")),
                media(Some("0"), Some("https://cdn/a.jpg")),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn builds_complete_view_model() {
        let vm = PropertyViewModel::build(&sample_property());

        assert_eq!(vm.monthly_price, "650€/mois");
        assert_eq!(vm.charges, "80€/mois");
        assert_eq!(vm.deposit, "650€");
        assert_eq!(vm.application_fees, "210€");
        assert_eq!(vm.total_monthly_cost, "730€/mois (tout compris)");
        assert_eq!(vm.full_address, "11 rue Raoul Follereau, Poitiers, 86000, France");
        assert_eq!(vm.short_address, "Poitiers, 86000");
        assert_eq!(vm.main_image, "https://cdn/a.jpg");
        assert_eq!(vm.images, vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
        assert_eq!(vm.beds, "1");
        assert_eq!(vm.baths, "1");
        assert_eq!(vm.area, "45");
        assert_eq!(vm.rooms, "2");
        assert_eq!(vm.property_type, "T2");
        assert_eq!(vm.features, vec!["Salle de bain", "Balcon"]);
        assert_eq!(vm.slug, "appartement-t2-moderne-centre-poitiers");
        assert!(vm.is_available);
    }

    #[test]
    fn missing_price_degrades_every_price_field() {
        let property = Property {
            price: None,
            ..sample_property()
        };
        let vm = PropertyViewModel::build(&property);

        assert_eq!(vm.monthly_price, "Prix non disponible");
        assert_eq!(vm.charges, "Charges non disponibles");
        assert_eq!(vm.deposit, "Dépôt non disponible");
        assert_eq!(vm.application_fees, "Frais non disponibles");
        assert_eq!(vm.total_monthly_cost, "Coût total non disponible");
    }

    #[test]
    fn each_price_field_falls_back_independently() {
        let property = Property {
            price: Some(PropertyPrice {
                monthly_price: Some(500.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(format_monthly_price(&property), "500€/mois");
        assert_eq!(format_charges(&property), "Charges non disponibles");
        assert_eq!(format_total_monthly_cost(&property), "500€/mois (tout compris)");
    }

    #[test]
    fn empty_entity_never_panics() {
        let vm = PropertyViewModel::build(&Property::default());

        assert_eq!(vm.full_address, "Adresse non disponible");
        assert_eq!(vm.short_address, "Localisation non disponible");
        assert_eq!(vm.main_image, PROPERTY_PLACEHOLDER);
        assert!(vm.images.is_empty());
        assert_eq!(vm.beds, "N/A");
        assert_eq!(vm.property_type, "Appartement");
        assert_eq!(vm.slug, "property-details");
    }

    #[test]
    fn blank_address_is_incomplete_not_unavailable() {
        let property = Property {
            address: Some(PropertyAddress {
                city: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(full_address(&property), "Adresse incomplète");
        assert_eq!(short_address(&property), "Localisation incomplète");
    }

    #[test]
    fn main_image_uses_lowest_order() {
        let images = vec![media(Some("2"), Some("b")), media(Some("0"), Some("a"))];
        assert_eq!(main_image(&images, PROPERTY_PLACEHOLDER), "a");
    }

    #[test]
    fn main_image_skips_entries_without_url() {
        let images = vec![media(Some("0"), None), media(Some("5"), Some("later"))];
        assert_eq!(main_image(&images, PROPERTY_PLACEHOLDER), "later");

        let only_broken = vec![media(Some("0"), None), media(Some("1"), Some(""))];
        assert_eq!(main_image(&only_broken, PROPERTY_PLACEHOLDER), PROPERTY_PLACEHOLDER);
    }

    #[test]
    fn unparsable_order_sorts_as_zero() {
        let images = vec![
            media(Some("1"), Some("one")),
            media(Some("abc"), Some("garbage")),
            media(None, Some("missing")),
        ];
        assert_eq!(all_images(&images), vec!["garbage", "missing", "one"]);
    }

    #[test]
    fn product_discount_shows_both_prices() {
        let product = Product {
            price: Some(19999.0),
            discount: 10000.0,
            ..Default::default()
        };
        let vm = ProductViewModel::build(&product);

        assert_eq!(vm.price, "9999€");
        assert_eq!(vm.original_price.as_deref(), Some("19999€"));
        assert!(vm.on_sale);
        assert!(vm.can_checkout);
        assert_eq!(vm.main_image, CARD_PLACEHOLDER);
    }

    #[test]
    fn free_product_cannot_be_checked_out() {
        let product = Product {
            price: Some(20.0),
            discount: 20.0,
            ..Default::default()
        };
        let vm = ProductViewModel::build(&product);
        assert!(!vm.can_checkout);
        assert_eq!(vm.price, "Gratuit");
        assert!(!ProductViewModel::build(&Product::default()).can_checkout);
    }

    #[test]
    fn product_price_keeps_cents() {
        let product = Product {
            price: Some(29.99),
            discount: 10.0,
            ..Default::default()
        };
        let vm = ProductViewModel::build(&product);

        assert_eq!(vm.price, "19.99€");
        assert_eq!(vm.original_price.as_deref(), Some("29.99€"));
    }

    #[test]
    fn service_price_is_monthly() {
        let service = Service {
            price: Some(299.0),
            characteristics: vec!["Suivi personnalisé".to_string()],
            ..Default::default()
        };
        let vm = ServiceViewModel::build(&service);

        assert_eq!(vm.price, "299€/mois");
        assert_eq!(vm.features, vec!["Suivi personnalisé"]);
    }

    #[test]
    fn services_sort_by_order() {
        let service = |id: &str, order: &str| Service {
            id: id.to_string(),
            order: Some(order.to_string()),
            ..Default::default()
        };
        let sorted = sort_services_by_order(&[service("c", "2"), service("a", "0"), service("b", "1")]);
        let ids: Vec<_> = sorted.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn slug_folds_accents_and_punctuation() {
        assert_eq!(slugify("Maison à Niort — Près du Marché !"), "maison-a-niort-pres-du-marche");
        assert_eq!(slugify("  Studio Étudiant  "), "studio-etudiant");
    }

    #[test]
    fn amounts_drop_trailing_zero() {
        assert_eq!(format_amount(650.0), "650");
        assert_eq!(format_amount(12.5), "12.5");
    }

    #[test]
    fn huge_amounts_do_not_saturate() {
        assert_eq!(format_amount(1e20), "100000000000000000000");
    }
}
