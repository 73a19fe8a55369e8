//! Admin panel
//!
//! Every request, filtered by owner email, with per-row status controls.

use crate::storage::{Request, RequestStatus, StorageResult, Store};
use crate::view::widgets::StatusBadge;
use serde::Serialize;

/// A status change offered on each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusAction {
    Approve,
    Reject,
}

impl StatusAction {
    pub fn all() -> &'static [StatusAction] {
        &[StatusAction::Approve, StatusAction::Reject]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Approve => "Approve",
            StatusAction::Reject => "Reject",
        }
    }

    /// Status the request moves to
    pub fn target(&self) -> RequestStatus {
        match self {
            StatusAction::Approve => RequestStatus::Approved,
            StatusAction::Reject => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRow {
    pub id: i64,
    pub email: String,
    pub kind: String,
    pub summary: String,
    pub badge: StatusBadge,
    pub actions: Vec<StatusAction>,
}

impl AdminRow {
    fn from_request(request: &Request) -> Self {
        Self {
            id: request.id,
            email: request.email.clone(),
            kind: request.kind.clone(),
            summary: request.item_summary(),
            badge: StatusBadge::new(&request.status),
            actions: StatusAction::all().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminView {
    /// Search text the rows were filtered with
    pub query: String,
    pub rows: Vec<AdminRow>,
}

/// Rows for every request whose owner email contains `query`, in store order
pub fn render_admin(store: &Store, query: &str) -> AdminView {
    let rows = store
        .search_requests(query)
        .into_iter()
        .map(AdminRow::from_request)
        .collect();

    AdminView {
        query: query.to_string(),
        rows,
    }
}

/// Change one request's status in place and persist
pub fn apply_status(store: &mut Store, id: i64, status: RequestStatus) -> StorageResult<()> {
    store.set_status(id, status)
}
