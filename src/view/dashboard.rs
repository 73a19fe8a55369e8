//! User dashboard
//!
//! Profile summary plus the logged-in account's own request history.

use crate::session::Session;
use crate::storage::{Request, Role, Store};
use crate::view::widgets::StatusBadge;
use crate::view::ViewError;
use serde::Serialize;

/// Text shown instead of an empty history list
pub const EMPTY_HISTORY_MESSAGE: &str = "No history found.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// One entry of the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCard {
    pub id: i64,
    pub kind: String,
    pub badge: StatusBadge,
    /// "name (xqty), ..."
    pub summary: String,
}

impl RequestCard {
    fn from_request(request: &Request) -> Self {
        Self {
            id: request.id,
            kind: request.kind.clone(),
            badge: StatusBadge::new(&request.status),
            summary: request.item_summary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum RequestHistory {
    /// Placeholder, see [`EMPTY_HISTORY_MESSAGE`]
    Empty,
    Entries(Vec<RequestCard>),
}

impl RequestHistory {
    pub fn len(&self) -> usize {
        match self {
            RequestHistory::Empty => 0,
            RequestHistory::Entries(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub profile: ProfileCard,
    pub history: RequestHistory,
}

/// Render the dashboard for the session's account
pub fn render_dashboard(store: &Store, session: &Session) -> Result<DashboardView, ViewError> {
    let account = session.current().ok_or(ViewError::NoSession)?;

    let profile = ProfileCard {
        name: account.full_name(),
        email: account.email.clone(),
        role: account.role,
    };

    let cards: Vec<RequestCard> = store
        .requests_for(&account.email)
        .into_iter()
        .map(RequestCard::from_request)
        .collect();

    let history = if cards.is_empty() {
        RequestHistory::Empty
    } else {
        RequestHistory::Entries(cards)
    };

    Ok(DashboardView { profile, history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Account, LineItem, MemoryBackend, RequestStatus, DEFAULT_STORAGE_KEY};
    use crate::view::BadgeStyle;

    fn create_test_store() -> Store {
        let mut store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY).unwrap();
        store
            .add_account(Account::new("Bob", "Builder", "bob@x.com", "pw").verified(true))
            .unwrap();
        store
    }

    fn login(store: &Store, email: &str, password: &str) -> Session {
        let mut session = Session::new();
        session.login(store, email, password).unwrap();
        session
    }

    #[test]
    fn test_requires_session() {
        let store = create_test_store();
        let err = render_dashboard(&store, &Session::new()).unwrap_err();
        assert_eq!(err, ViewError::NoSession);
    }

    #[test]
    fn test_empty_history_placeholder() {
        let store = create_test_store();
        let session = login(&store, "bob@x.com", "pw");

        let view = render_dashboard(&store, &session).unwrap();
        assert_eq!(view.profile.name, "Bob Builder");
        assert_eq!(view.profile.email, "bob@x.com");
        assert_eq!(view.profile.role, Role::User);
        assert_eq!(view.history, RequestHistory::Empty);
    }

    #[test]
    fn test_only_own_requests_newest_first() {
        let mut store = create_test_store();
        let older = store
            .submit_request("Stationery", vec![LineItem::new("Pen", "3")], "bob@x.com")
            .unwrap();
        store
            .submit_request("IT", vec![LineItem::new("Laptop", "1")], "admin@example.com")
            .unwrap();
        let newer = store
            .submit_request(
                "Office",
                vec![LineItem::new("Chair", "2"), LineItem::new("Desk", "1")],
                "bob@x.com",
            )
            .unwrap();
        store.set_status(older, RequestStatus::Approved).unwrap();

        let session = login(&store, "bob@x.com", "pw");
        let view = render_dashboard(&store, &session).unwrap();

        let RequestHistory::Entries(cards) = view.history else {
            panic!("expected entries");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, newer);
        assert_eq!(cards[0].summary, "Chair (x2), Desk (x1)");
        assert_eq!(cards[0].badge.style, BadgeStyle::Warning);
        assert_eq!(cards[1].id, older);
        assert_eq!(cards[1].badge.label, "Approved");
        assert_eq!(cards[1].badge.style, BadgeStyle::Success);
    }
}
