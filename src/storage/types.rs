//! Core data types for the request store
//!
//! This module defines the records persisted in the store blob:
//! - `Account`: A user or administrator who can log in
//! - `Request`: An itemized ask with a lifecycle status
//! - `LineItem`: One (name, quantity) entry of a request
//! - `StoreData`: The full persisted shape `{ accounts, requests }`

use serde::{Deserialize, Deserializer, Serialize};

/// Email of the administrator seeded on first load
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Password of the seeded administrator
pub const DEFAULT_ADMIN_PASSWORD: &str = "Password123!";

/// Role of an account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular requester
    #[default]
    User,
    /// Reviewer allowed to change request status
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A registered account
///
/// `email` is the lookup key. Uniqueness is assumed, not enforced on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub first: String,
    pub last: String,
    pub email: String,
    /// Stored and compared as plaintext
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub verified: bool,
}

impl Account {
    /// Create an unverified account with the user role
    pub fn new(
        first: impl Into<String>,
        last: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
            email: email.into(),
            password: password.into(),
            role: Role::User,
            verified: false,
        }
    }

    /// Builder method: set role
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Builder method: set verification flag
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// The administrator created when the store has none
    pub fn default_admin() -> Self {
        Self::new("Super", "Admin", DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
            .role(Role::Admin)
            .verified(true)
    }

    /// "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One line of a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    /// Quantity exactly as entered in the form
    #[serde(deserialize_with = "deserialize_qty")]
    pub qty: String,
}

impl LineItem {
    pub fn new(name: impl Into<String>, qty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: qty.into(),
        }
    }

    /// "name (xqty)"
    pub fn summary(&self) -> String {
        format!("{} (x{})", self.name, self.qty)
    }
}

/// Older blobs may carry the quantity as a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum QtyRepr {
    Text(String),
    Int(i64),
    Unsigned(u64),
    Float(f64),
}

fn deserialize_qty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match QtyRepr::deserialize(deserializer)? {
        QtyRepr::Text(s) => s,
        QtyRepr::Int(n) => n.to_string(),
        QtyRepr::Unsigned(n) => n.to_string(),
        QtyRepr::Float(f) => f.to_string(),
    })
}

/// Lifecycle status of a request
///
/// Serialized as its display string. Values outside the known set are kept
/// verbatim in `Other` so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Other(s) => s,
        }
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => RequestStatus::Pending,
            "Approved" => RequestStatus::Approved,
            "Rejected" => RequestStatus::Rejected,
            _ => RequestStatus::Other(value),
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(value: &str) -> Self {
        RequestStatus::from(value.to_string())
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    /// Creation-time derived identifier (Unix milliseconds, strictly increasing)
    pub id: i64,
    /// Free-form category
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Owner, referenced by value
    pub email: String,
    #[serde(default)]
    pub status: RequestStatus,
}

impl Request {
    /// Comma-joined item summaries
    pub fn item_summary(&self) -> String {
        self.items
            .iter()
            .map(LineItem::summary)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The persisted blob
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreData {
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Newest first
    #[serde(default)]
    pub requests: Vec<Request>,
}
