use super::fetchers::SharedSource;
use crate::error::{CatalogError, Result};
use crate::sources::{CheckoutSession, InterestRequest, OrderRequest};
use tokio::sync::Mutex;
use tracing::{info, warn};

const INTEREST_ERROR: &str = "Erreur lors de l'envoi de votre demande";
const ORDER_ERROR: &str = "Erreur lors de la création de la commande";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Form submission state for interest requests and checkout orders
pub struct Submission {
    source: SharedSource,
    status: Mutex<SubmissionStatus>,
}

impl Submission {
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            status: Mutex::new(SubmissionStatus::Idle),
        }
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.status.lock().await.clone()
    }

    pub async fn reset(&self) {
        *self.status.lock().await = SubmissionStatus::Idle;
    }

    pub async fn submit_interest(&self, request: &InterestRequest) -> Result<()> {
        self.begin().await?;
        let result = self.source.submit_interest(request).await;
        if result.is_ok() {
            info!("{}", request.kind.success_message());
        }
        self.finish(result, INTEREST_ERROR).await
    }

    /// Open a checkout session; the caller redirects to its `url`
    pub async fn create_order(&self, product_id: &str, order: &OrderRequest) -> Result<CheckoutSession> {
        self.begin().await?;
        let result = self.source.create_order(product_id, order).await;
        self.finish(result, ORDER_ERROR).await
    }

    async fn begin(&self) -> Result<()> {
        let mut status = self.status.lock().await;
        if *status == SubmissionStatus::Submitting {
            return Err(CatalogError::Validation("Envoi déjà en cours".to_string()));
        }
        *status = SubmissionStatus::Submitting;
        Ok(())
    }

    async fn finish<T>(&self, result: Result<T>, default_error: &str) -> Result<T> {
        let mut status = self.status.lock().await;
        match &result {
            Ok(_) => *status = SubmissionStatus::Succeeded,
            Err(err) => {
                let mut message = err.to_string();
                if message.trim().is_empty() {
                    message = default_error.to_string();
                }
                warn!("Submission failed: {}", message);
                *status = SubmissionStatus::Failed(message);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{InterestKind, MockCatalog, OrderAddress};
    use std::sync::Arc;
    use std::time::Duration;

    fn submission() -> Submission {
        Submission::new(Arc::new(MockCatalog::demo().unwrap()))
    }

    fn interest() -> InterestRequest {
        InterestRequest {
            first_name: "Léa".to_string(),
            last_name: "Bernard".to_string(),
            email: "lea.bernard@exemple.fr".to_string(),
            phone_number: "0549123456".to_string(),
            ..InterestRequest::new(InterestKind::Service, "44ba69ba-8b39-46cf-8b14-7547b503461a")
        }
    }

    #[tokio::test]
    async fn successful_interest() {
        let submission = submission();
        assert_eq!(submission.status().await, SubmissionStatus::Idle);

        submission.submit_interest(&interest()).await.unwrap();
        assert_eq!(submission.status().await, SubmissionStatus::Succeeded);

        submission.reset().await;
        assert_eq!(submission.status().await, SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn invalid_interest_fails_with_message() {
        let submission = submission();
        let mut request = interest();
        request.email = "lea".to_string();

        assert!(submission.submit_interest(&request).await.is_err());
        assert_eq!(
            submission.status().await,
            SubmissionStatus::Failed("Adresse e-mail invalide".to_string())
        );
    }

    #[tokio::test]
    async fn order_opens_session_and_rejects_unknown_product() {
        let submission = submission();
        let order = OrderRequest {
            first_name: "Léa".to_string(),
            last_name: "Bernard".to_string(),
            email: "lea.bernard@exemple.fr".to_string(),
            phone_number: "0549123456".to_string(),
            address: OrderAddress {
                street: "2 rue Carnot".to_string(),
                city: "Poitiers".to_string(),
                postal_code: "86000".to_string(),
                country: "France".to_string(),
            },
        };

        let session = submission.create_order("guide-investissement-immobilier", &order).await.unwrap();
        assert!(session.url.is_some());

        assert!(submission.create_order("missing", &order).await.is_err());
        assert!(matches!(submission.status().await, SubmissionStatus::Failed(_)));
    }

    #[tokio::test]
    async fn concurrent_submit_is_rejected() {
        let source = MockCatalog::demo().unwrap().with_latency(Duration::from_millis(50));
        let submission = Submission::new(Arc::new(source));
        let request = interest();

        let (first, second) = tokio::join!(submission.submit_interest(&request), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            submission.submit_interest(&request).await
        });

        assert!(first.is_ok());
        assert!(second.is_err());
        assert_eq!(submission.status().await, SubmissionStatus::Succeeded);
    }
}
