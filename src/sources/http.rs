use super::mock::MockCatalog;
use super::requests::{CheckoutSession, InterestRequest, OrderRequest};
use super::traits::CatalogSource;
use super::types::Listing;
use crate::catalog::{FilterSpec, Page};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{ContactInfo, EntityKind, Product, Property, Service};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.lag-services.com/api/v1";

mod endpoints {
    pub const PROPERTIES: &str = "/property";
    pub const FILTERED_PROPERTIES: &str = "/property/filter";
    pub const PRODUCTS: &str = "/products";
    pub const SERVICES: &str = "/accompaniements";
    pub const CONTACT: &str = "/contact";
    pub const ORDERS: &str = "/orders";
}

/// REST client for the company backend
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    /// Local services served when the services endpoint is unreachable
    service_fallback: Option<MockCatalog>,
}

impl HttpCatalog {
    /// Create a client for the default production API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(30))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api_url, config.timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CatalogError::Transport(format!("Failed to create HTTP client: {}", err)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_fallback: None,
        })
    }

    /// Serve services from `fallback` whenever the API call fails
    pub fn with_service_fallback(mut self, fallback: MockCatalog) -> Self {
        self.service_fallback = Some(fallback);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        debug!("Fetching {} with {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        Self::read_json(check_status(response)?).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!("Posting to {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        Self::read_json(check_status(response)?).await
    }

    /// Empty bodies (204, or a bare 201) decode as JSON `null`
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    async fn get_by_id<T: DeserializeOwned>(&self, kind: &'static str, base: &str, id: &str) -> Result<T> {
        self.get_json(&format!("{}/{}", base, id), &[])
            .await
            .map_err(|err| match err {
                CatalogError::Api { status: 404, .. } => CatalogError::NotFound {
                    kind,
                    id: id.to_string(),
                },
                other => other,
            })
    }

    async fn fetch_services(&self, filter: &FilterSpec) -> Result<Page<Service>> {
        let query = filter.query_pairs(EntityKind::Service);
        let listing: Listing<Service> = self.get_json(endpoints::SERVICES, &query).await?;
        Ok(listing.into_page(filter))
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("Backend returned status: {}", status);
    Err(CatalogError::Api {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
    })
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn all_properties(&self) -> Result<Vec<Property>> {
        self.get_json(endpoints::PROPERTIES, &[]).await
    }

    async fn properties(&self, filter: &FilterSpec) -> Result<Page<Property>> {
        let query = filter.query_pairs(EntityKind::Property);
        let listing: Listing<Property> = self.get_json(endpoints::FILTERED_PROPERTIES, &query).await?;
        let page = listing.into_page(filter);

        info!("Fetched {} of {} properties", page.items.len(), page.total);
        Ok(page)
    }

    async fn property(&self, id: &str) -> Result<Property> {
        self.get_by_id("Property", endpoints::PROPERTIES, id).await
    }

    async fn products(&self, filter: &FilterSpec) -> Result<Page<Product>> {
        let query = filter.query_pairs(EntityKind::Product);
        let listing: Listing<Product> = self.get_json(endpoints::PRODUCTS, &query).await?;
        Ok(listing.into_page(filter))
    }

    async fn product(&self, id: &str) -> Result<Product> {
        self.get_by_id("Product", endpoints::PRODUCTS, id).await
    }

    async fn all_services(&self) -> Result<Vec<Service>> {
        match self.get_json(endpoints::SERVICES, &[]).await {
            Ok(services) => Ok(services),
            Err(err) => match &self.service_fallback {
                Some(fallback) => {
                    warn!("Services API not available, using fallback data: {}", err);
                    fallback.all_services().await
                }
                None => Err(err),
            },
        }
    }

    async fn services(&self, filter: &FilterSpec) -> Result<Page<Service>> {
        match self.fetch_services(filter).await {
            Ok(page) => Ok(page),
            Err(err) => match &self.service_fallback {
                Some(fallback) => {
                    warn!("Services API not available, using fallback data: {}", err);
                    fallback.services(filter).await
                }
                None => Err(err),
            },
        }
    }

    async fn service(&self, id: &str) -> Result<Service> {
        match self.get_by_id("Service", endpoints::SERVICES, id).await {
            Ok(service) => Ok(service),
            Err(err) => match &self.service_fallback {
                Some(fallback) => {
                    warn!("Services API not available, using fallback data: {}", err);
                    fallback.service(id).await
                }
                None => Err(err),
            },
        }
    }

    async fn contact_info(&self) -> Result<ContactInfo> {
        self.get_json(endpoints::CONTACT, &[]).await
    }

    async fn submit_interest(&self, request: &InterestRequest) -> Result<()> {
        request.validate()?;

        let _: serde_json::Value = self
            .post_json(request.kind.endpoint(), &request.payload())
            .await?;
        info!("Submitted {:?} interest for {}", request.kind, request.target_id);
        Ok(())
    }

    async fn create_order(&self, product_id: &str, order: &OrderRequest) -> Result<CheckoutSession> {
        order.validate()?;

        let path = format!("{}/{}/checkout", endpoints::ORDERS, product_id);
        let session: CheckoutSession = self.post_json(&path, order).await?;
        info!("Opened checkout session for product {}", product_id);
        Ok(session)
    }

    async fn checkout_session(&self, session_id: &str) -> Result<CheckoutSession> {
        if session_id.is_empty() {
            return Err(CatalogError::Validation("ID de session requis".to_string()));
        }
        self.get_json(&format!("{}/checkout/{}", endpoints::ORDERS, session_id), &[])
            .await
    }

    fn source_name(&self) -> &'static str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::requests::InterestKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Answers a single request with `status` and `body`; yields the request head
    async fn serve_once(status: &'static str, body: &'static str) -> (HttpCatalog, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let mut response = format!("HTTP/1.1 {}\r\nConnection: close\r\n", status);
            if !status.starts_with("204") {
                response.push_str(&format!(
                    "Content-Type: application/json\r\nContent-Length: {}\r\n",
                    body.len()
                ));
            }
            response.push_str("\r\n");
            response.push_str(body);
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            let head = String::from_utf8_lossy(&request).lines().next().unwrap_or("").to_string();
            let _ = tx.send(head);
        });

        let catalog = HttpCatalog::with_base_url(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        (catalog, rx)
    }

    fn valid_interest() -> InterestRequest {
        InterestRequest {
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            email: "jean.dupont@exemple.com".to_string(),
            phone_number: "0612345678".to_string(),
            ..InterestRequest::new(InterestKind::Property, "p1")
        }
    }

    #[tokio::test]
    async fn missing_entity_maps_to_not_found() {
        let (catalog, _) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;

        let err = catalog.property("abc").await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotFound { kind: "Property", ref id } if id == "abc"
        ));
        assert_eq!(err.to_string(), "Property with ID abc not found");
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let (catalog, _) = serve_once("500 Internal Server Error", "{}").await;

        let err = catalog.properties(&FilterSpec::new()).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Api { status: 500, ref reason } if reason == "Internal Server Error"
        ));
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn empty_body_is_accepted() {
        let (catalog, rx) = serve_once("204 No Content", "").await;

        catalog.submit_interest(&valid_interest()).await.unwrap();
        assert!(rx.await.unwrap().starts_with("POST /property-request"));
    }

    #[tokio::test]
    async fn paged_envelope_is_decoded() {
        let (catalog, rx) = serve_once(
            "200 OK",
            r#"{"items":[{"id":"p2","title":"Studio Gare"}],"total":3,"page":2,"take":1}"#,
        )
        .await;

        let filter = FilterSpec::new().city("Poitiers").page(2, 1);
        let page = catalog.properties(&filter).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p2");
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);

        let head = rx.await.unwrap();
        assert!(head.starts_with("GET /property/filter?"));
        assert!(head.contains("city=Poitiers"));
        assert!(head.contains("page=2"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let catalog =
            HttpCatalog::with_base_url("http://localhost:3000/api/v1/", Duration::from_secs(1)).unwrap();

        assert_eq!(catalog.base_url(), "http://localhost:3000/api/v1");
        assert_eq!(catalog.url("/property/abc"), "http://localhost:3000/api/v1/property/abc");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let catalog = HttpCatalog::with_base_url("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let err = catalog.property("abc").await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn services_fall_back_to_local_data() {
        let catalog = HttpCatalog::with_base_url("http://127.0.0.1:9", Duration::from_millis(500))
            .unwrap()
            .with_service_fallback(MockCatalog::demo().unwrap());

        let services = catalog.featured_services(2).await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].order.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn invalid_interest_is_rejected_before_sending() {
        let catalog = HttpCatalog::with_base_url("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let request = InterestRequest::new(InterestKind::Property, "p1");

        let err = catalog.submit_interest(&request).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
