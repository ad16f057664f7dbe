use crate::attributes::decode_mapping;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::http::{ApiRequest, ApiResponse};
use crate::store::{ItemKey, ItemStore};
use tracing::debug;

use super::require_user;

pub fn run<S: ItemStore>(
    store: &S,
    config: &TrackerConfig,
    request: &ApiRequest,
) -> Result<ApiResponse> {
    let user = require_user(request)?;
    let key = ItemKey::new(user, &config.profile_sort_key);
    debug!(%key, "loading profile");

    let profile = match store.get_item(&key)? {
        Some(item) => decode_mapping(&item)?,
        None => Default::default(),
    };
    if profile.is_empty() {
        return Err(TrackerError::NotFound(format!(
            "Profile not found for user: {user}"
        )));
    }
    ApiResponse::ok_json(&profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::store::memory::fixtures::{item, TableFixture};
    use serde_json::json;

    fn request(user: &str) -> ApiRequest {
        ApiRequest::new("GET", "/profiles").with_user(user)
    }

    #[test]
    fn returns_decoded_profile() {
        let fixture = TableFixture::new().with_profile("u-1", "Ada");
        let response = run(&fixture.table, &TrackerConfig::default(), &request("u-1")).unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"userId": "u-1", "applicationId": "profile", "name": "Ada"})
        );
    }

    #[test]
    fn missing_profile_is_not_found() {
        let fixture = TableFixture::new().with_profile("u-2", "Grace");
        match run(&fixture.table, &TrackerConfig::default(), &request("u-1")) {
            Err(TrackerError::NotFound(msg)) => {
                assert_eq!(msg, "Profile not found for user: u-1")
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_number_surfaces_format_error() {
        let fixture = TableFixture::new();
        fixture
            .table
            .put_item(item("u-1", "profile", &[("age", AttrValue::N("forty".into()))]))
            .unwrap();
        assert!(matches!(
            run(&fixture.table, &TrackerConfig::default(), &request("u-1")),
            Err(TrackerError::Format(_))
        ));
    }

    #[test]
    fn requires_user() {
        let fixture = TableFixture::new();
        let anonymous = ApiRequest::new("GET", "/profiles");
        assert!(matches!(
            run(&fixture.table, &TrackerConfig::default(), &anonymous),
            Err(TrackerError::BadRequest(_))
        ));
    }
}
