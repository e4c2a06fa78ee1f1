pub mod preload;
pub mod provider;
pub mod providers;
pub mod types;

pub use preload::{CacheStatus, ResourceCache};
pub use provider::{BatchRequest, FetchError, ItemProvider};
pub use providers::CataasProvider;
pub use types::Item;
