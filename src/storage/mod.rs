//! Request Pro Storage
//!
//! This module holds the persisted application state:
//!
//! - **types**: Records (Account, Request, LineItem) and the blob shape
//! - **backend**: Key-value persistence boundary (file or memory)
//! - **store**: The Store, with load/seed/save and all mutations
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use request_pro::storage::{FileBackend, LineItem, Store, DEFAULT_STORAGE_KEY};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = Store::load(FileBackend::new("./data"), DEFAULT_STORAGE_KEY)?;
//!
//!     let id = store.submit_request("Stationery", vec![LineItem::new("Pen", "3")], "bob@x.com")?;
//!     println!("Submitted request {}", id);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::{StorageError, StorageResult};
pub use store::{Store, StoreStats, DEFAULT_STORAGE_KEY};
pub use types::{
    Account, LineItem, Request, RequestStatus, Role, StoreData, DEFAULT_ADMIN_EMAIL,
    DEFAULT_ADMIN_PASSWORD,
};
