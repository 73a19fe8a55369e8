//! Small view pieces shared by several screens

use crate::session::Session;
use crate::storage::RequestStatus;
use serde::Serialize;

/// Visual style of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    Warning,
    Success,
    Danger,
    /// Any status outside the known set
    Secondary,
}

impl BadgeStyle {
    pub fn for_status(status: &RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => BadgeStyle::Warning,
            RequestStatus::Approved => BadgeStyle::Success,
            RequestStatus::Rejected => BadgeStyle::Danger,
            RequestStatus::Other(_) => BadgeStyle::Secondary,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            BadgeStyle::Warning => "bg-warning",
            BadgeStyle::Success => "bg-success",
            BadgeStyle::Danger => "bg-danger",
            BadgeStyle::Secondary => "bg-secondary",
        }
    }
}

/// A status label with its style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub style: BadgeStyle,
}

impl StatusBadge {
    pub fn new(status: &RequestStatus) -> Self {
        Self {
            label: status.to_string(),
            style: BadgeStyle::for_status(status),
        }
    }
}

/// Navigation bar shown on every view except the login screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBar {
    /// First name of the logged-in account
    pub username: String,
    /// Admin-only links are visible
    pub show_admin_links: bool,
}

impl NavBar {
    /// `None` without a logged-in account
    pub fn for_session(session: &Session) -> Option<Self> {
        session.current().map(|account| Self {
            username: account.first.clone(),
            show_admin_links: account.is_admin(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_styles() {
        assert_eq!(BadgeStyle::for_status(&RequestStatus::Pending), BadgeStyle::Warning);
        assert_eq!(BadgeStyle::for_status(&RequestStatus::Approved), BadgeStyle::Success);
        assert_eq!(BadgeStyle::for_status(&RequestStatus::Rejected), BadgeStyle::Danger);
        assert_eq!(
            BadgeStyle::for_status(&RequestStatus::from("Escalated")),
            BadgeStyle::Secondary
        );
        assert_eq!(BadgeStyle::Danger.class_name(), "bg-danger");
    }

    #[test]
    fn test_badge_label() {
        let badge = StatusBadge::new(&RequestStatus::from("Escalated"));
        assert_eq!(badge.label, "Escalated");
        assert_eq!(badge.style, BadgeStyle::Secondary);
    }

    #[test]
    fn test_nav_bar_requires_session() {
        assert!(NavBar::for_session(&Session::new()).is_none());
    }
}
