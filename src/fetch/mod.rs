pub mod fetchers;
pub mod query;
pub mod search;
pub mod submission;

pub use fetchers::{
    checkout_session_query, contact_query, featured_products_query, featured_properties_query,
    product_query, products_query, properties_query, property_query, service_query,
    services_query, SharedSource,
};
pub use query::{FetchStatus, Fetcher, Query, Snapshot};
pub use search::{Search, SearchTerms};
pub use submission::{Submission, SubmissionStatus};
