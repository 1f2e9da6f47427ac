use super::requests::{CheckoutSession, InterestRequest, OrderRequest};
use super::traits::CatalogSource;
use crate::catalog::pagination::DEFAULT_PAGE_SIZE;
use crate::catalog::{apply_filters, paginate, FilterSpec, Filterable, Page};
use crate::error::{CatalogError, Result};
use crate::models::{ContactInfo, Product, Property, Service};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

const DEMO_FIXTURES: &str = include_str!("../../fixtures/catalog.json");

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixtures {
    properties: Vec<Property>,
    products: Vec<Product>,
    services: Vec<Service>,
    contact: ContactInfo,
}

/// In-process catalogue over fixture data.
///
/// Filtering and pagination run locally with the same engine the listing
/// pages use, so it behaves like the remote API for demos and tests.
pub struct MockCatalog {
    properties: Vec<Property>,
    products: Vec<Product>,
    services: Vec<Service>,
    contact: ContactInfo,
    latency: Option<Duration>,
    sessions: Mutex<HashMap<String, CheckoutSession>>,
}

impl MockCatalog {
    pub fn new(properties: Vec<Property>, products: Vec<Product>, services: Vec<Service>) -> Self {
        Self {
            properties,
            products,
            services,
            contact: ContactInfo::default(),
            latency: None,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Catalogue loaded from a JSON document with `properties`, `products`,
    /// `services` and `contact` keys
    pub fn from_json(raw: &str) -> Result<Self> {
        let fixtures: Fixtures = serde_json::from_str(raw)?;
        let mut catalog = Self::new(fixtures.properties, fixtures.products, fixtures.services);
        catalog.contact = fixtures.contact;
        Ok(catalog)
    }

    /// Built-in demo listings
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_FIXTURES)
    }

    /// Delay every call, to exercise loading states
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_network_delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn page_of<T: Clone + Filterable>(items: &[T], filter: &FilterSpec) -> Page<T> {
        let filtered = apply_filters(items, filter);
        paginate(
            &filtered,
            filter.page.unwrap_or(1),
            filter.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    fn find<'a, T>(
        items: &'a [T],
        kind: &'static str,
        id: &str,
        id_of: impl Fn(&T) -> &str,
    ) -> Result<&'a T> {
        items
            .iter()
            .find(|item| id_of(*item) == id)
            .ok_or_else(|| CatalogError::NotFound {
                kind,
                id: id.to_string(),
            })
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn all_properties(&self) -> Result<Vec<Property>> {
        self.simulate_network_delay().await;
        Ok(self.properties.clone())
    }

    async fn properties(&self, filter: &FilterSpec) -> Result<Page<Property>> {
        self.simulate_network_delay().await;
        let page = Self::page_of(&self.properties, filter);
        debug!("Mock properties: {} of {} on page {}", page.items.len(), page.total, page.page);
        Ok(page)
    }

    async fn property(&self, id: &str) -> Result<Property> {
        self.simulate_network_delay().await;
        Self::find(&self.properties, "Property", id, |p| p.id.as_str()).cloned()
    }

    async fn products(&self, filter: &FilterSpec) -> Result<Page<Product>> {
        self.simulate_network_delay().await;
        Ok(Self::page_of(&self.products, filter))
    }

    async fn product(&self, id: &str) -> Result<Product> {
        self.simulate_network_delay().await;
        Self::find(&self.products, "Product", id, |p| p.id.as_str()).cloned()
    }

    async fn all_services(&self) -> Result<Vec<Service>> {
        self.simulate_network_delay().await;
        Ok(self.services.clone())
    }

    async fn services(&self, filter: &FilterSpec) -> Result<Page<Service>> {
        self.simulate_network_delay().await;
        Ok(Self::page_of(&self.services, filter))
    }

    async fn service(&self, id: &str) -> Result<Service> {
        self.simulate_network_delay().await;
        Self::find(&self.services, "Service", id, |s| s.id.as_str()).cloned()
    }

    async fn contact_info(&self) -> Result<ContactInfo> {
        self.simulate_network_delay().await;
        Ok(self.contact.clone())
    }

    async fn submit_interest(&self, request: &InterestRequest) -> Result<()> {
        request.validate()?;
        self.simulate_network_delay().await;
        info!(
            "Interest submitted (demo mode): {}",
            request.payload()
        );
        Ok(())
    }

    async fn create_order(&self, product_id: &str, order: &OrderRequest) -> Result<CheckoutSession> {
        order.validate()?;
        let product = self.product(product_id).await?;

        let session_id = format!("cs_demo_{}", product.id);
        let mut extra = serde_json::Map::new();
        extra.insert("productId".to_string(), product.id.clone().into());
        if let Some(price) = product.final_price() {
            extra.insert("amountTotal".to_string(), price.into());
        }
        extra.insert("customerEmail".to_string(), order.email.clone().into());

        let session = CheckoutSession {
            id: Some(session_id.clone()),
            url: Some(format!("/payment-success?session_id={}", session_id)),
            extra,
        };

        self.sessions
            .lock()
            .await
            .insert(session_id.clone(), session.clone());
        info!("Checkout session {} opened (demo mode)", session_id);
        Ok(session)
    }

    async fn checkout_session(&self, session_id: &str) -> Result<CheckoutSession> {
        if session_id.is_empty() {
            return Err(CatalogError::Validation("ID de session requis".to_string()));
        }
        self.simulate_network_delay().await;
        self.sessions
            .lock()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                kind: "Checkout session",
                id: session_id.to_string(),
            })
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}
