use crate::catalog::{paginate, FilterSpec, Page};
use serde::{Deserialize, Serialize};

/// Paginated envelope returned by the filter endpoints.
///
/// The backend is inconsistent about which metadata it sends, so everything
/// except `items` is optional and recomputed when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPage<T> {
    pub items: Vec<T>,
    pub total: Option<usize>,
    pub page: Option<usize>,
    #[serde(alias = "limit")]
    pub take: Option<usize>,
    pub total_pages: Option<usize>,
    pub has_next: Option<bool>,
    pub has_prev: Option<bool>,
}

/// List endpoints answer either with an envelope or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(ApiPage<T>),
    Bare(Vec<T>),
}

impl<T> ApiPage<T> {
    pub fn into_page(self, requested: &FilterSpec) -> Page<T> {
        let page = self.page.or(requested.page).unwrap_or(1);
        let page_size = self
            .take
            .or(requested.limit)
            .unwrap_or(self.items.len());
        let total = self.total.unwrap_or(self.items.len());

        let mut result = Page::from_parts(self.items, total, page, page_size);
        if let Some(total_pages) = self.total_pages {
            result.total_pages = total_pages;
        }
        if let Some(has_next) = self.has_next {
            result.has_next = has_next;
        }
        if let Some(has_prev) = self.has_prev {
            result.has_prev = has_prev;
        }
        result
    }
}

impl<T: Clone> Listing<T> {
    /// Bare arrays are sliced locally with the requested page
    pub fn into_page(self, requested: &FilterSpec) -> Page<T> {
        match self {
            Listing::Paged(page) => page.into_page(requested),
            Listing::Bare(items) => {
                let page_size = requested.limit.unwrap_or(items.len());
                paginate(&items, requested.page.unwrap_or(1), page_size)
            }
        }
    }
}
