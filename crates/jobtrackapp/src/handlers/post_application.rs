use crate::attributes::encode_mapping;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::http::{ApiRequest, ApiResponse, APPLICATION_ID};
use crate::store::ItemStore;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{object_body, require_user};

/// Create or replace an application.
///
/// The sort key comes from the `Application-Id` header when present,
/// otherwise a fresh `app#<uuid>` is generated. The response echoes the
/// stored object, keys included, so the client learns the generated id.
pub fn run<S: ItemStore>(
    store: &S,
    config: &TrackerConfig,
    request: &ApiRequest,
) -> Result<ApiResponse> {
    let user = require_user(request)?;
    let sort = match request.header(APPLICATION_ID).filter(|id| !id.is_empty()) {
        Some(id) if config.is_profile_key(id) => {
            return Err(TrackerError::BadRequest(format!(
                "{APPLICATION_ID} cannot be {id:?}; use the /profiles endpoint instead."
            )));
        }
        Some(id) => id.to_string(),
        None => format!("{}{}", config.application_prefix, Uuid::new_v4()),
    };

    let mut application = object_body(request)?;
    application.insert(config.partition_key.clone(), Value::String(user.to_string()));
    application.insert(config.sort_key.clone(), Value::String(sort.clone()));

    store.put_item(encode_mapping(&application))?;
    info!(user, application = %sort, "application saved");
    ApiResponse::ok_json(&application)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::store::memory::fixtures::TableFixture;
    use crate::store::ItemKey;
    use serde_json::json;

    fn request(body: &str) -> ApiRequest {
        ApiRequest::new("POST", "/applications")
            .with_user("u-1")
            .with_body(body)
    }

    #[test]
    fn generates_prefixed_id() {
        let fixture = TableFixture::new();
        let response = run(
            &fixture.table,
            &TrackerConfig::default(),
            &request(r#"{"company": "Acme", "rounds": 2}"#),
        )
        .unwrap();

        let body = response.body_json().unwrap();
        let id = body["applicationId"].as_str().unwrap();
        assert!(id.starts_with("app#"));
        assert!(Uuid::parse_str(id.trim_start_matches("app#")).is_ok());
        assert_eq!(body["userId"], json!("u-1"));
        // Echo is the request JSON, not a decoded read-back.
        assert_eq!(body["rounds"], json!(2));

        let stored = fixture
            .table
            .get_item(&ItemKey::new("u-1", id))
            .unwrap()
            .unwrap();
        assert_eq!(stored["rounds"], AttrValue::N("2".into()));
    }

    #[test]
    fn uses_supplied_id_and_replaces() {
        let fixture = TableFixture::new().with_application("u-1", "app#7", "Old");
        run(
            &fixture.table,
            &TrackerConfig::default(),
            &request(r#"{"company": "New"}"#).with_header(APPLICATION_ID, "app#7"),
        )
        .unwrap();

        assert_eq!(fixture.table.len(), 1);
        let stored = fixture
            .table
            .get_item(&ItemKey::new("u-1", "app#7"))
            .unwrap()
            .unwrap();
        assert_eq!(stored["company"], AttrValue::S("New".into()));
    }

    #[test]
    fn refuses_profile_id() {
        let fixture = TableFixture::new().with_profile("u-1", "Ada");
        let result = run(
            &fixture.table,
            &TrackerConfig::default(),
            &request(r#"{"company": "x"}"#).with_header(APPLICATION_ID, "PROFILE"),
        );
        assert!(matches!(result, Err(TrackerError::BadRequest(_))));
    }

    #[test]
    fn invalid_json_is_bad_request() {
        let fixture = TableFixture::new();
        let result = run(&fixture.table, &TrackerConfig::default(), &request("{oops"));
        assert!(matches!(
            result,
            Err(TrackerError::BadRequest(msg)) if msg.starts_with("Invalid JSON format")
        ));
        assert!(fixture.table.is_empty());
    }

    #[test]
    fn requires_user() {
        let fixture = TableFixture::new();
        let anonymous = ApiRequest::new("POST", "/applications").with_body("{}");
        assert!(matches!(
            run(&fixture.table, &TrackerConfig::default(), &anonymous),
            Err(TrackerError::BadRequest(msg)) if msg == "User-Id header is required"
        ));
    }
}
