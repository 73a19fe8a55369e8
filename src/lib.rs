//! # Request Pro
//!
//! Itemized request tracking: users submit requests made of named line
//! items, administrators review them and change their status, and the whole
//! state persists as a single JSON blob.
//!
//! ## Modules
//!
//! - [`storage`]: Accounts, requests and the persisted store
//! - [`session`]: Login state for the running instance
//! - [`view`]: Pure view descriptions (dashboard, form, admin panel)
//! - [`app`]: Root context turning UI events into screens
//! - [`console`]: Text rendering and command parsing for the terminal UI
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use request_pro::{App, Event, MemoryBackend, Store, DEFAULT_STORAGE_KEY};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY)?;
//!     let mut app = App::new(store);
//!
//!     app.dispatch(Event::Login {
//!         email: "admin@example.com".into(),
//!         password: "Password123!".into(),
//!     })?;
//!     app.dispatch(Event::SetCategory("Stationery".into()))?;
//!     app.dispatch(Event::AddItem { name: "Pen".into(), qty: "3".into() })?;
//!     app.dispatch(Event::Submit)?;
//!
//!     println!("{}", request_pro::console::render(&app.screen()));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod console;
pub mod logging;
pub mod session;
pub mod storage;
pub mod view;

// Re-export top-level types for convenience
pub use storage::{
    Account, FileBackend, KeyValueBackend, LineItem, MemoryBackend, Request, RequestStatus, Role,
    StorageError, StorageResult, Store, StoreData, StoreStats, DEFAULT_STORAGE_KEY,
};

pub use session::{AuthError, Session};

pub use view::{
    AdminView, DashboardView, NavBar, RequestForm, Router, StatusBadge, SubmitError, ViewError,
    ViewName,
};

pub use app::{App, Event, Screen, ScreenBody};

pub use config::{Config, ConfigError, LoggingConfig, StorageConfig};
