//! Fetchers binding each catalogue resource to a [`CatalogSource`] call.

use super::query::{Fetcher, Query};
use crate::catalog::{FilterSpec, Page};
use crate::error::Result;
use crate::models::{ContactInfo, Product, Property, Service};
use crate::sources::{CatalogSource, CheckoutSession};
use async_trait::async_trait;
use std::sync::Arc;

pub type SharedSource = Arc<dyn CatalogSource>;

pub struct PropertyList(pub SharedSource);

#[async_trait]
impl Fetcher<FilterSpec, Page<Property>> for PropertyList {
    async fn fetch(&self, filter: &FilterSpec) -> Result<Page<Property>> {
        self.0.properties(filter).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement des biens"
    }
}

/// Single property; an empty id leaves the query idle
pub struct PropertyById(pub SharedSource);

#[async_trait]
impl Fetcher<String, Property> for PropertyById {
    async fn fetch(&self, id: &String) -> Result<Property> {
        self.0.property(id).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement du bien"
    }

    fn should_fetch(&self, id: &String) -> bool {
        !id.trim().is_empty()
    }
}

/// Featured properties, keyed by how many to show
pub struct FeaturedProperties(pub SharedSource);

#[async_trait]
impl Fetcher<usize, Vec<Property>> for FeaturedProperties {
    async fn fetch(&self, limit: &usize) -> Result<Vec<Property>> {
        self.0.featured_properties(*limit).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement des biens mis en avant"
    }
}

pub struct ProductList(pub SharedSource);

#[async_trait]
impl Fetcher<FilterSpec, Page<Product>> for ProductList {
    async fn fetch(&self, filter: &FilterSpec) -> Result<Page<Product>> {
        self.0.products(filter).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement des produits"
    }
}

pub struct ProductById(pub SharedSource);

#[async_trait]
impl Fetcher<String, Product> for ProductById {
    async fn fetch(&self, id: &String) -> Result<Product> {
        self.0.product(id).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement du produit"
    }

    fn should_fetch(&self, id: &String) -> bool {
        !id.trim().is_empty()
    }
}

pub struct FeaturedProducts(pub SharedSource);

#[async_trait]
impl Fetcher<usize, Vec<Product>> for FeaturedProducts {
    async fn fetch(&self, limit: &usize) -> Result<Vec<Product>> {
        self.0.featured_products(*limit).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement des produits mis en avant"
    }
}

pub struct ServiceList(pub SharedSource);

#[async_trait]
impl Fetcher<FilterSpec, Page<Service>> for ServiceList {
    async fn fetch(&self, filter: &FilterSpec) -> Result<Page<Service>> {
        self.0.services(filter).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement des services"
    }
}

pub struct ServiceById(pub SharedSource);

#[async_trait]
impl Fetcher<String, Service> for ServiceById {
    async fn fetch(&self, id: &String) -> Result<Service> {
        self.0.service(id).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement du service"
    }

    fn should_fetch(&self, id: &String) -> bool {
        !id.trim().is_empty()
    }
}

pub struct Contact(pub SharedSource);

#[async_trait]
impl Fetcher<(), ContactInfo> for Contact {
    async fn fetch(&self, _key: &()) -> Result<ContactInfo> {
        self.0.contact_info().await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors du chargement des informations de contact"
    }
}

/// Payment session, looked up after the provider redirects back
pub struct CheckoutSessionById(pub SharedSource);

#[async_trait]
impl Fetcher<String, CheckoutSession> for CheckoutSessionById {
    async fn fetch(&self, session_id: &String) -> Result<CheckoutSession> {
        self.0.checkout_session(session_id).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors de la récupération de la session"
    }

    fn should_fetch(&self, session_id: &String) -> bool {
        !session_id.trim().is_empty()
    }
}

/// Property listing driven by `filter`, loaded immediately
pub async fn properties_query(source: SharedSource, filter: FilterSpec) -> Query<FilterSpec, Page<Property>> {
    Query::start(PropertyList(source), filter).await
}

pub async fn property_query(source: SharedSource, id: impl Into<String>) -> Query<String, Property> {
    Query::start(PropertyById(source), id.into()).await
}

pub async fn featured_properties_query(source: SharedSource, limit: usize) -> Query<usize, Vec<Property>> {
    Query::start(FeaturedProperties(source), limit).await
}

pub async fn products_query(source: SharedSource, filter: FilterSpec) -> Query<FilterSpec, Page<Product>> {
    Query::start(ProductList(source), filter).await
}

pub async fn product_query(source: SharedSource, id: impl Into<String>) -> Query<String, Product> {
    Query::start(ProductById(source), id.into()).await
}

pub async fn featured_products_query(source: SharedSource, limit: usize) -> Query<usize, Vec<Product>> {
    Query::start(FeaturedProducts(source), limit).await
}

pub async fn services_query(source: SharedSource, filter: FilterSpec) -> Query<FilterSpec, Page<Service>> {
    Query::start(ServiceList(source), filter).await
}

pub async fn service_query(source: SharedSource, id: impl Into<String>) -> Query<String, Service> {
    Query::start(ServiceById(source), id.into()).await
}

pub async fn contact_query(source: SharedSource) -> Query<(), ContactInfo> {
    Query::start(Contact(source), ()).await
}

pub async fn checkout_session_query(
    source: SharedSource,
    session_id: impl Into<String>,
) -> Query<String, CheckoutSession> {
    Query::start(CheckoutSessionById(source), session_id.into()).await
}
