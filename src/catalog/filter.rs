use super::characteristics::derive_type;
use super::view_model::format_amount;
use crate::models::{EntityKind, Product, Property, Service};
use serde::{Deserialize, Serialize};

/// Optional constraints narrowing a catalogue listing.
///
/// Every field is optional; `None` and empty strings never constrain the
/// result. The same filter drives local filtering and the remote query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub city: Option<String>,
    /// Derived property type ("T2", "Studio") or product type code ("BOOK")
    pub type_code: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    /// 1-indexed
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn type_code(mut self, code: impl Into<String>) -> Self {
        self.type_code = Some(code.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.is_featured = Some(featured);
        self
    }

    pub fn page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Number of narrowing criteria in use (pagination excluded)
    pub fn active_criteria(&self) -> usize {
        [
            non_empty(&self.search).is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
            non_empty(&self.city).is_some(),
            non_empty(&self.type_code).is_some(),
            non_empty(&self.category).is_some(),
            self.is_featured.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// Query parameters for the remote API; unset fields are omitted entirely
    pub fn query_pairs(&self, kind: EntityKind) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(search) = non_empty(&self.search) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", format_amount(min)));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", format_amount(max)));
        }
        if let Some(featured) = self.is_featured {
            pairs.push(("isFeatured", featured.to_string()));
        }
        if let Some(city) = non_empty(&self.city) {
            pairs.push(("city", city.to_string()));
        }
        if let Some(code) = non_empty(&self.type_code) {
            let key = match kind {
                EntityKind::Property => "propertyType",
                EntityKind::Product | EntityKind::Service => "type",
            };
            pairs.push((key, code.to_string()));
        }
        if let Some(category) = non_empty(&self.category) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

/// Per-kind accessors the filter engine reads.
///
/// `None` from `featured`, `city`, `type_code` or `category` means the kind
/// has no such field, so the matching criterion does not apply to it.
pub trait Filterable {
    fn search_fields(&self) -> Vec<&str>;

    /// Price the bounds compare against
    fn effective_price(&self) -> Option<f64>;

    fn featured(&self) -> Option<bool> {
        None
    }

    fn city(&self) -> Option<&str> {
        None
    }

    fn type_code(&self) -> Option<String> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }
}

impl Filterable for Property {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(city) = Property::city(self) {
            fields.push(city);
        }
        fields
    }

    fn effective_price(&self) -> Option<f64> {
        self.monthly_price()
    }

    fn featured(&self) -> Option<bool> {
        Some(self.is_featured)
    }

    fn city(&self) -> Option<&str> {
        Some(Property::city(self).unwrap_or(""))
    }

    fn type_code(&self) -> Option<String> {
        Some(derive_type(&self.characteristics))
    }
}

impl Filterable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn effective_price(&self) -> Option<f64> {
        self.final_price()
    }

    fn featured(&self) -> Option<bool> {
        Some(self.is_featured)
    }

    fn type_code(&self) -> Option<String> {
        Some(self.product_type.code().to_string())
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_deref().unwrap_or(""))
    }
}

impl Filterable for Service {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.short_description.as_str(),
        ]
    }

    fn effective_price(&self) -> Option<f64> {
        self.price
    }
}

/// Whether a single entity satisfies every set criterion of `filter`
pub fn matches<T: Filterable>(entity: &T, filter: &FilterSpec) -> bool {
    if let Some(term) = non_empty(&filter.search) {
        let term = term.to_lowercase();
        let hit = entity
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }

    if let Some(min) = filter.min_price {
        if !entity.effective_price().is_some_and(|price| price >= min) {
            return false;
        }
    }

    if let Some(max) = filter.max_price {
        if !entity.effective_price().is_some_and(|price| price <= max) {
            return false;
        }
    }

    if let Some(wanted) = filter.is_featured {
        if entity.featured().is_some_and(|featured| featured != wanted) {
            return false;
        }
    }

    if let Some(city) = non_empty(&filter.city) {
        let city = city.to_lowercase();
        if entity
            .city()
            .is_some_and(|own| !own.to_lowercase().contains(&city))
        {
            return false;
        }
    }

    if let Some(code) = non_empty(&filter.type_code) {
        if entity.type_code().is_some_and(|own| own != code) {
            return false;
        }
    }

    if let Some(category) = non_empty(&filter.category) {
        if entity.category().is_some_and(|own| own != category) {
            return false;
        }
    }

    true
}

/// Entities satisfying `filter`, in their original order
pub fn apply_filters<T: Filterable + Clone>(entities: &[T], filter: &FilterSpec) -> Vec<T> {
    entities
        .iter()
        .filter(|entity| matches(*entity, filter))
        .cloned()
        .collect()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}
