//! End-to-end flows through the application root against a real store file

use request_pro::storage::{FileBackend, LineItem, Request, RequestStatus, Role, StoreData};
use request_pro::{App, Event, ScreenBody, Store, ViewName, DEFAULT_STORAGE_KEY};
use tempfile::tempdir;

fn login(app: &mut App, email: &str, password: &str) {
    app.dispatch(Event::Login {
        email: email.to_string(),
        password: password.to_string(),
    })
    .unwrap();
}

fn submit(app: &mut App, category: &str, items: &[(&str, &str)]) {
    app.dispatch(Event::SetCategory(category.to_string())).unwrap();
    for (name, qty) in items {
        app.dispatch(Event::AddItem {
            name: name.to_string(),
            qty: qty.to_string(),
        })
        .unwrap();
    }
    app.dispatch(Event::Submit).unwrap();
}

fn read_blob(dir: &std::path::Path) -> StoreData {
    let raw = std::fs::read_to_string(FileBackend::new(dir).path_for(DEFAULT_STORAGE_KEY)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_empty_store_scenario() {
    let dir = tempdir().unwrap();
    std::fs::write(
        FileBackend::new(dir.path()).path_for(DEFAULT_STORAGE_KEY),
        r#"{"accounts":[],"requests":[]}"#,
    )
    .unwrap();

    let mut store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(store.accounts().len(), 1);
    let admin = &store.accounts()[0];
    assert_eq!(admin.email, "admin@example.com");
    assert_eq!(admin.role, Role::Admin);
    assert!(admin.verified);

    store
        .add_account(
            request_pro::Account::new("Bob", "X", "bob@x.com", "pw").verified(true),
        )
        .unwrap();

    let mut app = App::new(store);
    login(&mut app, "bob@x.com", "pw");
    submit(&mut app, "Stationery", &[("Pen", "3")]);

    let first = &app.store().requests()[0];
    assert_eq!(first.kind, "Stationery");
    assert_eq!(first.items, vec![LineItem::new("Pen", "3")]);
    assert_eq!(first.email, "bob@x.com");
    assert_eq!(first.status, RequestStatus::Pending);

    // The blob on disk matches memory
    let blob = read_blob(dir.path());
    assert_eq!(blob.requests, app.store().requests().to_vec());
}

#[test]
fn test_valid_submissions_grow_by_one_at_front() {
    let dir = tempdir().unwrap();
    let store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    let mut app = App::new(store);
    login(&mut app, "admin@example.com", "Password123!");

    for (i, category) in ["Stationery", "IT", "Travel"].iter().enumerate() {
        submit(&mut app, category, &[("Thing", "2")]);
        assert_eq!(app.store().requests().len(), i + 1);
        assert_eq!(app.store().requests()[0].kind, *category);
    }
}

#[test]
fn test_invalid_submissions_change_nothing() {
    let dir = tempdir().unwrap();
    let store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    let mut app = App::new(store);
    login(&mut app, "admin@example.com", "Password123!");

    submit(&mut app, "", &[("Pen", "1")]);
    assert!(app.store().requests().is_empty());
    assert!(app.alert().is_some());

    app.dispatch(Event::DismissAlert).unwrap();
    // Form kept its rows; clear them and try blank names only
    let rows: Vec<u32> = app.form().rows.iter().map(|r| r.row_id).collect();
    for row in rows {
        app.dispatch(Event::RemoveItem(row)).unwrap();
    }
    submit(&mut app, "Stationery", &[("  ", "1"), ("", "4")]);

    assert!(app.store().requests().is_empty());
    assert!(app.alert().is_some());
    assert!(read_blob(dir.path()).requests.is_empty());
}

#[test]
fn test_admin_status_change_and_search() {
    let dir = tempdir().unwrap();
    let mut store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    for (kind, email) in [
        ("A", "alice@corp.com"),
        ("B", "bob@corp.com"),
        ("C", "Alice.Jones@corp.com"),
    ] {
        store
            .submit_request(kind, vec![LineItem::new("x", "1")], email)
            .unwrap();
    }
    let before: Vec<Request> = store.requests().to_vec();

    let mut app = App::new(store);
    login(&mut app, "admin@example.com", "Password123!");
    app.dispatch(Event::ShowView(ViewName::Admin)).unwrap();

    // Empty query returns everything in store order
    let ScreenBody::Admin(view) = app.screen().body else {
        panic!("expected admin panel");
    };
    let ids: Vec<i64> = view.rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, before.iter().map(|r| r.id).collect::<Vec<_>>());

    app.dispatch(Event::Search("alice".to_string())).unwrap();
    let ScreenBody::Admin(view) = app.screen().body else {
        panic!("expected admin panel");
    };
    let kinds: Vec<&str> = view.rows.iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(kinds, vec!["C", "A"]);

    let target = view.rows[1].id;
    app.dispatch(Event::SetStatus {
        id: target,
        status: RequestStatus::Approved,
    })
    .unwrap();

    // Filter survives the re-render, only the target changed
    let ScreenBody::Admin(view) = app.screen().body else {
        panic!("expected admin panel");
    };
    assert_eq!(view.query, "alice");
    assert_eq!(view.rows.len(), 2);
    for request in app.store().requests() {
        let expected = if request.id == target {
            RequestStatus::Approved
        } else {
            RequestStatus::Pending
        };
        assert_eq!(request.status, expected);
    }

    // And it is persisted
    let reloaded = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(
        reloaded.find_request(target).unwrap().status,
        RequestStatus::Approved
    );
}

#[test]
fn test_session_not_persisted() {
    let dir = tempdir().unwrap();

    {
        let store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
        let mut app = App::new(store);
        login(&mut app, "admin@example.com", "Password123!");
        assert_eq!(app.active_view(), ViewName::User);
    }

    let store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    let app = App::new(store);
    assert!(app.session().current().is_none());
    assert_eq!(app.active_view(), ViewName::Auth);
}

#[test]
fn test_orphaned_requests_render() {
    let dir = tempdir().unwrap();
    std::fs::write(
        FileBackend::new(dir.path()).path_for(DEFAULT_STORAGE_KEY),
        r#"{"accounts":[],"requests":[{"id":1700000000000,"type":"Legacy","items":[{"name":"Box","qty":2}],"email":"ghost@gone.com","status":"Archived"}]}"#,
    )
    .unwrap();

    let store = Store::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY).unwrap();
    let mut app = App::new(store);
    login(&mut app, "admin@example.com", "Password123!");
    app.dispatch(Event::ShowView(ViewName::Admin)).unwrap();

    let ScreenBody::Admin(view) = app.screen().body else {
        panic!("expected admin panel");
    };
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].summary, "Box (x2)");
    assert_eq!(view.rows[0].badge.label, "Archived");

    // Next id stays ahead of existing ones
    app.dispatch(Event::ShowView(ViewName::User)).unwrap();
    submit(&mut app, "New", &[("Pen", "1")]);
    assert!(app.store().requests()[0].id > 1_700_000_000_000);
}
