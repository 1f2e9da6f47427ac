pub mod http;
pub mod mock;
pub mod requests;
pub mod traits;
pub mod types;

pub use http::HttpCatalog;
pub use mock::MockCatalog;
pub use requests::{CheckoutSession, InterestKind, InterestRequest, OrderAddress, OrderRequest};
pub use traits::CatalogSource;
pub use types::{ApiPage, Listing};
