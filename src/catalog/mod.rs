pub mod characteristics;
pub mod favorites;
pub mod filter;
pub mod pagination;
pub mod view_model;

pub use favorites::{Favorites, JsonFileStore, KeyValueStore, MemoryStore};
pub use filter::{apply_filters, FilterSpec, Filterable};
pub use pagination::{paginate, visible_pages, Page, PageLink};
pub use view_model::{ProductViewModel, PropertyViewModel, ServiceViewModel};
