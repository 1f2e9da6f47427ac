use super::requests::{CheckoutSession, InterestRequest, OrderRequest};
use crate::catalog::view_model::sort_services_by_order;
use crate::catalog::{FilterSpec, Page};
use crate::error::Result;
use crate::models::{ContactInfo, Product, Property, Service};
use async_trait::async_trait;

pub const DEFAULT_FEATURED_LIMIT: usize = 6;
pub const DEFAULT_FEATURED_SERVICES: usize = 3;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Common trait for every catalogue backend.
///
/// Implemented by the remote REST client and by the local fixture catalogue;
/// both honour the same [`FilterSpec`] semantics.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn all_properties(&self) -> Result<Vec<Property>>;

    async fn properties(&self, filter: &FilterSpec) -> Result<Page<Property>>;

    async fn property(&self, id: &str) -> Result<Property>;

    async fn products(&self, filter: &FilterSpec) -> Result<Page<Product>>;

    async fn product(&self, id: &str) -> Result<Product>;

    async fn all_services(&self) -> Result<Vec<Service>>;

    async fn services(&self, filter: &FilterSpec) -> Result<Page<Service>>;

    async fn service(&self, id: &str) -> Result<Service>;

    async fn contact_info(&self) -> Result<ContactInfo>;

    /// Forward a property or service interest request to the backend
    async fn submit_interest(&self, request: &InterestRequest) -> Result<()>;

    /// Open a payment session for a product
    async fn create_order(&self, product_id: &str, order: &OrderRequest) -> Result<CheckoutSession>;

    async fn checkout_session(&self, session_id: &str) -> Result<CheckoutSession>;

    /// Get the name of the catalogue source
    fn source_name(&self) -> &'static str;

    async fn featured_properties(&self, limit: usize) -> Result<Vec<Property>> {
        let filter = FilterSpec::new().featured(true).page(1, limit);
        Ok(self.properties(&filter).await?.items)
    }

    async fn search_properties(&self, query: &str, limit: usize) -> Result<Vec<Property>> {
        let filter = FilterSpec::new().search(query).page(1, limit);
        Ok(self.properties(&filter).await?.items)
    }

    async fn featured_products(&self, limit: usize) -> Result<Vec<Product>> {
        let filter = FilterSpec::new().featured(true).page(1, limit);
        Ok(self.products(&filter).await?.items)
    }

    async fn search_products(&self, query: &str, limit: usize) -> Result<Vec<Product>> {
        let filter = FilterSpec::new().search(query).page(1, limit);
        Ok(self.products(&filter).await?.items)
    }

    /// First services in display order
    async fn featured_services(&self, limit: usize) -> Result<Vec<Service>> {
        let services = self.all_services().await?;
        Ok(sort_services_by_order(&services)
            .into_iter()
            .take(limit)
            .collect())
    }
}
