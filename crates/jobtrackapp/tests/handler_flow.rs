use jobtrackapp::api::{Route, TrackerApi};
use jobtrackapp::config::TrackerConfig;
use jobtrackapp::http::{ApiRequest, APPLICATION_ID};
use jobtrackapp::store::file::FileTable;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn setup() -> (TempDir, TrackerApi<FileTable>) {
    let dir = TempDir::new().unwrap();
    let config = TrackerConfig::default();
    let table = FileTable::new(config.table_file(dir.path()), config.key_schema());
    (dir, TrackerApi::new(table, config))
}

fn as_user(method: &str, path: &str) -> ApiRequest {
    ApiRequest::new(method, path).with_user("u-1")
}

#[test]
fn profile_round_trip() {
    let (_dir, api) = setup();

    let missing = api.dispatch(&as_user("GET", "/profiles"));
    assert_eq!(missing.status_code, 404);

    let saved = api.dispatch(&as_user("POST", "/profiles").with_body(
        r#"{"name": "Ada", "remote": true, "address": {"city": "London", "zip": null}}"#,
    ));
    assert_eq!(saved.status_code, 200);

    let loaded = api.dispatch(&as_user("GET", "/profiles"));
    assert_eq!(loaded.status_code, 200);
    assert_eq!(
        loaded.body_json().unwrap(),
        json!({
            "userId": "u-1",
            "applicationId": "profile",
            "name": "Ada",
            "remote": true,
            "address": {"city": "London", "zip": null}
        })
    );
}

#[test]
fn profile_is_not_an_application() {
    let (_dir, api) = setup();
    api.dispatch(&as_user("POST", "/profiles").with_body(r#"{"name": "Ada"}"#));

    let listed = api.dispatch(&as_user("GET", "/applications"));
    assert_eq!(listed.status_code, 404);

    let direct = api.dispatch(&as_user("GET", "/applications").with_query(APPLICATION_ID, "profile"));
    assert_eq!(direct.status_code, 400);

    let deleted = api.dispatch(&as_user("DELETE", "/applications").with_query(APPLICATION_ID, "app#x"));
    assert_eq!(deleted.status_code, 404);
}

#[test]
fn applications_crud() {
    let (_dir, api) = setup();
    for company in ["Acme", "Globex"] {
        let created = api.handle(
            Route::PostApplication,
            &as_user("POST", "/applications").with_body(json!({"company": company}).to_string()),
        );
        assert_eq!(created.status_code, 200);
    }

    let listed = api.dispatch(&as_user("GET", "/applications"));
    let apps = listed.body_json().unwrap();
    assert_eq!(apps.as_array().unwrap().len(), 2);

    let first_id = apps[0]["applicationId"].as_str().unwrap().to_string();
    let removed = api.dispatch(
        &as_user("DELETE", "/applications").with_query(APPLICATION_ID, &first_id),
    );
    assert_eq!(removed.status_code, 200);

    let remaining = api.dispatch(&as_user("GET", "/applications")).body_json().unwrap();
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_ne!(remaining[0]["applicationId"], json!(first_id));
}

#[test]
fn users_are_isolated() {
    let (_dir, api) = setup();
    api.dispatch(
        &as_user("POST", "/applications")
            .with_header(APPLICATION_ID, "app#shared")
            .with_body(r#"{"company": "Acme"}"#),
    );

    let other = ApiRequest::new("GET", "/applications").with_user("u-2");
    assert_eq!(api.dispatch(&other).status_code, 404);
}

#[test]
fn concurrent_requests_share_one_api() {
    let (_dir, api) = setup();
    let api = Arc::new(api);
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let api = Arc::clone(&api);
            std::thread::spawn(move || {
                let request = as_user("POST", "/applications")
                    .with_header(APPLICATION_ID, &format!("app#{n}"))
                    .with_body(json!({"n": n}).to_string());
                api.dispatch(&request).status_code
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 200);
    }

    let listed = api.dispatch(&as_user("GET", "/applications")).body_json().unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 8);
}
