//! Views
//!
//! Pure functions from (store, session, view state) to declarative view
//! descriptions. Nothing in here draws; see [`crate::console`] for that.
//!
//! - **dashboard**: Profile card and the user's own request history
//! - **form**: Request submission form
//! - **admin**: Filterable request table with status controls
//! - **widgets**: Status badge and navigation bar
//!
//! The [`Router`] tracks which single top-level view is active.

pub mod admin;
pub mod dashboard;
pub mod form;
pub mod widgets;

pub use admin::{apply_status, render_admin, AdminRow, AdminView, StatusAction};
pub use dashboard::{
    render_dashboard, DashboardView, ProfileCard, RequestCard, RequestHistory,
    EMPTY_HISTORY_MESSAGE,
};
pub use form::{ItemRow, RequestForm, SubmitError, INCOMPLETE_FORM_MESSAGE};
pub use widgets::{BadgeStyle, NavBar, StatusBadge};

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("No user is logged in")]
    NoSession,

    #[error("Unknown view: {0}")]
    UnknownView(String),
}

/// Top-level screens. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    #[default]
    Auth,
    User,
    Admin,
}

impl ViewName {
    pub fn all() -> &'static [ViewName] {
        &[ViewName::Auth, ViewName::User, ViewName::Admin]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Auth => "auth",
            ViewName::User => "user",
            ViewName::Admin => "admin",
        }
    }

    /// Container id by the `<name>View` convention
    pub fn container_id(&self) -> String {
        format!("{}View", self.as_str())
    }

    /// Whether the navigation bar is shown alongside this view
    pub fn shows_nav(&self) -> bool {
        *self != ViewName::Auth
    }
}

impl std::fmt::Display for ViewName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auth" => Ok(ViewName::Auth),
            "user" => Ok(ViewName::User),
            "admin" => Ok(ViewName::Admin),
            other => Err(ViewError::UnknownView(other.to_string())),
        }
    }
}

/// Active-view state machine. No history stack.
#[derive(Debug, Clone, Default)]
pub struct Router {
    active: ViewName,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ViewName {
        self.active
    }

    /// Make `name` the only visible view
    pub fn show(&mut self, name: ViewName) {
        if self.active != name {
            tracing::debug!("View {} -> {}", self.active, name);
        }
        self.active = name;
    }

    /// Visibility of every container, keyed by container id
    pub fn visibility(&self) -> Vec<(String, bool)> {
        ViewName::all()
            .iter()
            .map(|view| (view.container_id(), *view == self.active))
            .collect()
    }
}
