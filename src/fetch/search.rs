use super::fetchers::SharedSource;
use super::query::{Fetcher, Query, Snapshot};
use crate::error::Result;
use crate::models::{Product, Property};
use crate::sources::traits::DEFAULT_SEARCH_LIMIT;
use async_trait::async_trait;

/// Free-text query plus how many hits to return
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerms {
    pub text: String,
    pub limit: usize,
}

impl SearchTerms {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub struct PropertySearch(pub SharedSource);

#[async_trait]
impl Fetcher<SearchTerms, Vec<Property>> for PropertySearch {
    async fn fetch(&self, terms: &SearchTerms) -> Result<Vec<Property>> {
        self.0.search_properties(terms.text.trim(), terms.limit).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors de la recherche"
    }

    fn should_fetch(&self, terms: &SearchTerms) -> bool {
        !terms.is_blank()
    }
}

pub struct ProductSearch(pub SharedSource);

#[async_trait]
impl Fetcher<SearchTerms, Vec<Product>> for ProductSearch {
    async fn fetch(&self, terms: &SearchTerms) -> Result<Vec<Product>> {
        self.0.search_products(terms.text.trim(), terms.limit).await
    }

    fn default_error(&self) -> &'static str {
        "Erreur lors de la recherche"
    }

    fn should_fetch(&self, terms: &SearchTerms) -> bool {
        !terms.is_blank()
    }
}

/// Search box state. A blank query clears the results without a request.
pub struct Search<T: Send> {
    query: Query<SearchTerms, Vec<T>>,
    limit: usize,
}

impl<T: Clone + Send + 'static> Search<T> {
    pub fn new(fetcher: impl Fetcher<SearchTerms, Vec<T>> + 'static) -> Self {
        Self::with_limit(fetcher, DEFAULT_SEARCH_LIMIT)
    }

    pub fn with_limit(fetcher: impl Fetcher<SearchTerms, Vec<T>> + 'static, limit: usize) -> Self {
        let terms = SearchTerms {
            text: String::new(),
            limit,
        };
        Self {
            query: Query::new(fetcher, terms),
            limit,
        }
    }

    /// Run `text`; repeating the current text searches again
    pub async fn search(&self, text: &str) {
        let terms = SearchTerms {
            text: text.trim().to_string(),
            limit: self.limit,
        };
        if !self.query.set_key(terms).await {
            self.query.refetch().await;
        }
    }

    pub async fn clear(&self) {
        let blank = SearchTerms {
            text: String::new(),
            limit: self.limit,
        };
        if !self.query.set_key(blank).await {
            self.query.reset().await;
        }
    }

    pub async fn text(&self) -> String {
        self.query.key().await.text
    }

    pub async fn snapshot(&self) -> Snapshot<Vec<T>> {
        self.query.snapshot().await
    }
}

impl Search<Property> {
    pub fn properties(source: SharedSource) -> Self {
        Self::new(PropertySearch(source))
    }
}

impl Search<Product> {
    pub fn products(source: SharedSource) -> Self {
        Self::new(ProductSearch(source))
    }
}
