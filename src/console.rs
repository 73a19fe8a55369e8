//! Console front-end
//!
//! Turns a [`Screen`] into terminal text and typed lines into [`Event`]s.
//! This is the only place that knows how things look.

use crate::app::{Event, Screen, ScreenBody};
use crate::storage::RequestStatus;
use crate::view::{
    AdminView, DashboardView, NavBar, RequestForm, RequestHistory, ViewName,
    EMPTY_HISTORY_MESSAGE,
};
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (type 'help')")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Help,
    Quit,
    /// Empty line, just redraw
    Redraw,
}

pub const HELP_TEXT: &str = "\
Commands:
  login <email> <password>   sign in
  logout                     sign out
  view <auth|user|admin>     switch view
  category <text>            set the request category
  item <name> [qty]          add an item row (qty defaults to 1)
  name <row> <text>          rename an item row
  qty <row> <value>          change an item row quantity
  rm <row>                   remove an item row
  submit                     submit the request
  search [text]              filter the admin table by email
  approve <id>               approve a request (admin)
  reject <id>                reject a request (admin)
  status <id> <value>        set any status (admin)
  ok                         dismiss the alert
  help                       show this text
  quit                       exit";

/// Parse one typed line
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let event = match word.to_lowercase().as_str() {
        "" => return Ok(Command::Redraw),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "login" => match args.as_slice() {
            [email, password] => Event::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(ParseError::Usage("login <email> <password>")),
        },
        "logout" => Event::Logout,
        "view" => {
            let view: ViewName = rest
                .parse()
                .map_err(|_| ParseError::Usage("view <auth|user|admin>"))?;
            Event::ShowView(view)
        }
        "category" => Event::SetCategory(rest.to_string()),
        "item" => {
            if args.is_empty() {
                return Err(ParseError::Usage("item <name> [qty]"));
            }
            let (name, qty) = split_trailing_qty(&args);
            Event::AddItem { name, qty }
        }
        "name" => {
            let (row, text) = rest
                .split_once(char::is_whitespace)
                .ok_or(ParseError::Usage("name <row> <text>"))?;
            Event::SetItemName {
                row: parse_number(row)?,
                name: text.trim().to_string(),
            }
        }
        "qty" => match args.as_slice() {
            [row, qty] => Event::SetItemQty {
                row: parse_number(row)?,
                qty: qty.to_string(),
            },
            _ => return Err(ParseError::Usage("qty <row> <value>")),
        },
        "rm" => match args.as_slice() {
            [row] => Event::RemoveItem(parse_number(row)?),
            _ => return Err(ParseError::Usage("rm <row>")),
        },
        "submit" => Event::Submit,
        "search" => Event::Search(rest.to_string()),
        "approve" | "reject" => {
            let id: i64 = match args.as_slice() {
                [id] => parse_number(id)?,
                _ => return Err(ParseError::Usage("approve|reject <id>")),
            };
            let status = if word.eq_ignore_ascii_case("approve") {
                RequestStatus::Approved
            } else {
                RequestStatus::Rejected
            };
            Event::SetStatus { id, status }
        }
        "status" => {
            let (id, value) = rest
                .split_once(char::is_whitespace)
                .ok_or(ParseError::Usage("status <id> <value>"))?;
            Event::SetStatus {
                id: parse_number(id)?,
                status: RequestStatus::from(value.trim()),
            }
        }
        "ok" => Event::DismissAlert,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Command::Event(event))
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, ParseError> {
    s.trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber(s.to_string()))
}

/// "Red Pen 3" → ("Red Pen", "3"); "Red Pen" → ("Red Pen", "1")
fn split_trailing_qty(args: &[&str]) -> (String, String) {
    match args.split_last() {
        Some((last, head)) if !head.is_empty() && last.parse::<f64>().is_ok() => {
            (head.join(" "), last.to_string())
        }
        _ => (args.join(" "), crate::view::form::DEFAULT_QTY.to_string()),
    }
}

/// Draw a screen as text
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();

    match &screen.nav {
        Some(nav) => render_nav(&mut out, nav, screen.view),
        None => {
            let _ = writeln!(out, "=== Request Pro ===");
        }
    }

    if let Some(alert) = &screen.alert {
        let _ = writeln!(out);
        let _ = writeln!(out, "!! {}", alert);
        let _ = writeln!(out, "   (type 'ok' to dismiss)");
    }

    let _ = writeln!(out);
    match &screen.body {
        ScreenBody::Auth => render_auth(&mut out),
        ScreenBody::User { dashboard, form } => {
            render_dashboard(&mut out, dashboard);
            let _ = writeln!(out);
            render_form(&mut out, form);
        }
        ScreenBody::Admin(admin) => render_admin(&mut out, admin),
    }

    out
}

fn render_nav(out: &mut String, nav: &NavBar, active: ViewName) {
    let mut links = vec![link("Dashboard", active == ViewName::User)];
    if nav.show_admin_links {
        links.push(link("Admin", active == ViewName::Admin));
    }
    links.push("Logout".to_string());

    let _ = writeln!(
        out,
        "=== Request Pro ===  Hi, {}  |  {}",
        nav.username,
        links.join("  |  ")
    );
}

fn link(label: &str, active: bool) -> String {
    if active {
        format!("[{}]", label)
    } else {
        label.to_string()
    }
}

fn render_auth(out: &mut String) {
    let _ = writeln!(out, "Sign in");
    let _ = writeln!(out, "  login <email> <password>");
}

fn render_dashboard(out: &mut String, dashboard: &DashboardView) {
    let profile = &dashboard.profile;
    let _ = writeln!(out, "Profile");
    let _ = writeln!(out, "  {}", profile.name);
    let _ = writeln!(out, "  {}", profile.email);
    let _ = writeln!(out, "  Role: {}", profile.role);
    let _ = writeln!(out);

    let _ = writeln!(out, "My Requests");
    match &dashboard.history {
        RequestHistory::Empty => {
            let _ = writeln!(out, "  {}", EMPTY_HISTORY_MESSAGE);
        }
        RequestHistory::Entries(cards) => {
            for card in cards {
                let _ = writeln!(
                    out,
                    "  #{} {:<16} {:<10}  {}",
                    card.id,
                    card.kind,
                    format!("[{}]", card.badge.label),
                    card.summary
                );
            }
        }
    }
}

fn render_form(out: &mut String, form: &RequestForm) {
    let _ = writeln!(out, "New Request");
    let category = if form.category.is_empty() {
        "(none)"
    } else {
        form.category.as_str()
    };
    let _ = writeln!(out, "  Category: {}", category);

    if form.rows.is_empty() {
        let _ = writeln!(out, "  (no items, add one with 'item <name> [qty]')");
    }
    for row in &form.rows {
        let name = if row.name.is_empty() { "_" } else { row.name.as_str() };
        let _ = writeln!(out, "  row {:<3} {:<24} x{}", row.row_id, name, row.qty);
    }
}

fn render_admin(out: &mut String, admin: &AdminView) {
    let _ = writeln!(out, "All Requests   search: {:?}", admin.query);

    if admin.rows.is_empty() {
        let _ = writeln!(out, "  No matching requests.");
        return;
    }

    let _ = writeln!(
        out,
        "{:<15} {:<24} {:<14} {:<30} {:<10} {}",
        "ID", "Email", "Type", "Items", "Status", "Actions"
    );
    let _ = writeln!(out, "{}", "-".repeat(110));

    for row in &admin.rows {
        let actions: Vec<String> = row
            .actions
            .iter()
            .map(|a| format!("{} {}", a.label().to_lowercase(), row.id))
            .collect();
        let _ = writeln!(
            out,
            "{:<15} {:<24} {:<14} {:<30} {:<10} {}",
            row.id,
            row.email,
            row.kind,
            row.summary,
            row.badge.label,
            actions.join(" / ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::storage::{MemoryBackend, Store, DEFAULT_STORAGE_KEY};

    fn event(line: &str) -> Event {
        match parse_command(line).unwrap() {
            Command::Event(event) => event,
            other => panic!("expected event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            event("login bob@x.com hunter2"),
            Event::Login {
                email: "bob@x.com".to_string(),
                password: "hunter2".to_string(),
            }
        );
        assert_eq!(
            parse_command("login bob@x.com").unwrap_err(),
            ParseError::Usage("login <email> <password>")
        );
    }

    #[test]
    fn test_parse_item_with_and_without_qty() {
        assert_eq!(
            event("item Red Pen 3"),
            Event::AddItem {
                name: "Red Pen".to_string(),
                qty: "3".to_string(),
            }
        );
        assert_eq!(
            event("item Stapler"),
            Event::AddItem {
                name: "Stapler".to_string(),
                qty: "1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_status_commands() {
        assert_eq!(
            event("approve 17"),
            Event::SetStatus {
                id: 17,
                status: RequestStatus::Approved,
            }
        );
        assert_eq!(
            event("status 17 On Hold"),
            Event::SetStatus {
                id: 17,
                status: RequestStatus::Other("On Hold".to_string()),
            }
        );
        assert_eq!(
            parse_command("reject abc").unwrap_err(),
            ParseError::InvalidNumber("abc".to_string())
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("").unwrap(), Command::Redraw);
        assert_eq!(parse_command("QUIT").unwrap(), Command::Quit);
        assert_eq!(event("search"), Event::Search(String::new()));
        assert_eq!(event("view admin"), Event::ShowView(ViewName::Admin));
        assert!(matches!(
            parse_command("dance"),
            Err(ParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_render_auth_screen() {
        let store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY).unwrap();
        let app = App::new(store);

        let text = render(&app.screen());
        assert!(text.contains("Sign in"));
        assert!(!text.contains("Logout"));
    }

    #[test]
    fn test_render_admin_flow() {
        let store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY).unwrap();
        let mut app = App::new(store);

        for line in [
            "login admin@example.com Password123!",
            "category Stationery",
            "name 0 Pen",
            "qty 0 3",
            "submit",
        ] {
            app.dispatch(event(line)).unwrap();
        }

        let text = render(&app.screen());
        assert!(text.contains("Hi, Super"));
        assert!(text.contains("[Dashboard]"));
        assert!(text.contains("Pen (x3)"));
        assert!(text.contains("[Pending]"));

        app.dispatch(event("view admin")).unwrap();
        let text = render(&app.screen());
        assert!(text.contains("[Admin]"));
        assert!(text.contains("admin@example.com"));
        assert!(text.contains("approve "));

        app.dispatch(event("search nobody")).unwrap();
        assert!(render(&app.screen()).contains("No matching requests."));
    }

    #[test]
    fn test_render_alert() {
        let store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY).unwrap();
        let mut app = App::new(store);
        app.dispatch(event("login admin@example.com nope")).unwrap();

        let text = render(&app.screen());
        assert!(text.contains("!! Access denied. Please check credentials."));
    }
}
