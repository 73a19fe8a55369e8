//! Application root
//!
//! `App` owns the store, the session and all view state. UI events go in
//! through [`App::dispatch`]; the current screen comes out of
//! [`App::screen`] as a plain description with no drawing attached.
//!
//! ```text
//! event → mutate session/store (store persists itself) → screen()
//! ```

use crate::config::Config;
use crate::session::Session;
use crate::storage::{RequestStatus, StorageError, StorageResult, Store};
use crate::view::{
    apply_status, render_admin, render_dashboard, AdminView, DashboardView, NavBar,
    RequestForm, Router, SubmitError, ViewName,
};

/// Alert shown when a view needs a logged-in user
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in first.";

/// Alert shown when a non-admin opens the admin panel
pub const ADMIN_REQUIRED_MESSAGE: &str = "Administrator access required.";

/// Alert shown when no request id is left above the stored ones
pub const ID_EXHAUSTED_MESSAGE: &str = "Request could not be numbered. No ids are left.";

/// A user interaction
#[derive(Clone, PartialEq, Eq)]
pub enum Event {
    Login { email: String, password: String },
    Logout,
    ShowView(ViewName),
    SetCategory(String),
    AddItem { name: String, qty: String },
    RemoveItem(u32),
    SetItemName { row: u32, name: String },
    SetItemQty { row: u32, qty: String },
    Submit,
    Search(String),
    SetStatus { id: i64, status: RequestStatus },
    DismissAlert,
}

impl Event {
    /// Short name for log lines. Never includes field values.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Login { .. } => "login",
            Event::Logout => "logout",
            Event::ShowView(_) => "show_view",
            Event::SetCategory(_) => "set_category",
            Event::AddItem { .. } => "add_item",
            Event::RemoveItem(_) => "remove_item",
            Event::SetItemName { .. } => "set_item_name",
            Event::SetItemQty { .. } => "set_item_qty",
            Event::Submit => "submit",
            Event::Search(_) => "search",
            Event::SetStatus { .. } => "set_status",
            Event::DismissAlert => "dismiss_alert",
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}

/// What the active view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    /// Login form
    Auth,
    User {
        dashboard: DashboardView,
        form: RequestForm,
    },
    Admin(AdminView),
}

/// Everything visible at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub view: ViewName,
    pub nav: Option<NavBar>,
    /// Blocking message the user has to acknowledge
    pub alert: Option<String>,
    pub body: ScreenBody,
}

/// Single owner of all application state
#[derive(Debug)]
pub struct App {
    config: Config,
    store: Store,
    session: Session,
    router: Router,
    form: RequestForm,
    admin_query: String,
    alert: Option<String>,
}

impl App {
    /// Wrap an already opened store with default settings
    pub fn new(store: Store) -> Self {
        Self::with_config(Config::default(), store)
    }

    pub fn with_config(config: Config, store: Store) -> Self {
        Self {
            config,
            store,
            session: Session::new(),
            router: Router::new(),
            form: RequestForm::new(),
            admin_query: String::new(),
            alert: None,
        }
    }

    /// Open the configured store and start on the login view
    pub fn open(config: &Config) -> StorageResult<Self> {
        let store = config.storage.open_store()?;
        Ok(Self::with_config(config.clone(), store))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active_view(&self) -> ViewName {
        self.router.active()
    }

    pub fn form(&self) -> &RequestForm {
        &self.form
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Apply one user interaction.
    ///
    /// Validation and login failures end up in the alert and leave the store
    /// untouched. Only failures to persist are returned as errors.
    pub fn dispatch(&mut self, event: Event) -> StorageResult<()> {
        tracing::debug!(event = event.name(), view = %self.router.active(), "Dispatching");

        match event {
            Event::Login { email, password } => {
                match self.session.login(&self.store, &email, &password) {
                    Ok(_) => {
                        self.alert = None;
                        self.router.show(ViewName::User);
                    }
                    Err(e) => self.alert = Some(e.to_string()),
                }
            }
            Event::Logout => {
                self.session.logout();
                self.form.reset();
                self.admin_query.clear();
                self.router.show(ViewName::Auth);
            }
            Event::ShowView(view) => self.show_view(view),
            Event::SetCategory(category) => self.form.set_category(category),
            Event::AddItem { name, qty } => {
                self.form.add_item(name, qty);
            }
            Event::RemoveItem(row) => {
                self.form.remove_item(row);
            }
            Event::SetItemName { row, name } => {
                self.form.set_item_name(row, name);
            }
            Event::SetItemQty { row, qty } => {
                self.form.set_item_qty(row, qty);
            }
            Event::Submit => match self.form.submit(&mut self.store, &self.session) {
                Ok(_) => self.alert = None,
                Err(SubmitError::Validation(message)) => self.alert = Some(message),
                Err(SubmitError::NoSession) => {
                    self.alert = Some(LOGIN_REQUIRED_MESSAGE.to_string())
                }
                Err(SubmitError::Storage(StorageError::IdOverflow(max))) => {
                    tracing::warn!("No request id left above {}", max);
                    self.alert = Some(ID_EXHAUSTED_MESSAGE.to_string())
                }
                Err(SubmitError::Storage(e)) => return Err(e),
            },
            Event::Search(query) => self.admin_query = query,
            Event::SetStatus { id, status } => {
                if !self.session.is_admin() {
                    self.alert = Some(ADMIN_REQUIRED_MESSAGE.to_string());
                    return Ok(());
                }
                match apply_status(&mut self.store, id, status) {
                    Ok(()) => {}
                    Err(StorageError::RequestNotFound(id)) => {
                        self.alert = Some(format!("Request {} not found.", id))
                    }
                    Err(e) => return Err(e),
                }
            }
            Event::DismissAlert => self.alert = None,
        }

        Ok(())
    }

    fn show_view(&mut self, view: ViewName) {
        match view {
            ViewName::Auth => self.router.show(ViewName::Auth),
            _ if !self.session.is_logged_in() => {
                self.alert = Some(LOGIN_REQUIRED_MESSAGE.to_string());
                self.router.show(ViewName::Auth);
            }
            ViewName::Admin if !self.session.is_admin() => {
                tracing::warn!("Non-admin session tried to open the admin panel");
                self.alert = Some(ADMIN_REQUIRED_MESSAGE.to_string());
                self.router.show(ViewName::User);
            }
            other => self.router.show(other),
        }
    }

    /// Describe the current screen from store, session and view state
    pub fn screen(&self) -> Screen {
        let view = self.router.active();
        let nav = if view.shows_nav() {
            NavBar::for_session(&self.session)
        } else {
            None
        };

        let body = match view {
            ViewName::Auth => ScreenBody::Auth,
            ViewName::User => match render_dashboard(&self.store, &self.session) {
                Ok(dashboard) => ScreenBody::User {
                    dashboard,
                    form: self.form.clone(),
                },
                Err(_) => ScreenBody::Auth,
            },
            ViewName::Admin => ScreenBody::Admin(render_admin(&self.store, &self.admin_query)),
        };

        Screen {
            view,
            nav,
            alert: self.alert.clone(),
            body,
        }
    }
}
