use crate::attributes::encode_mapping;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::http::{ApiRequest, ApiResponse};
use crate::store::ItemStore;
use serde_json::Value;
use tracing::info;

use super::{object_body, require_user, BODY_REQUIRED};

pub fn run<S: ItemStore>(
    store: &S,
    config: &TrackerConfig,
    request: &ApiRequest,
) -> Result<ApiResponse> {
    let user = require_user(request)?;
    let mut profile = object_body(request)?;
    if profile.is_empty() {
        return Err(TrackerError::BadRequest(BODY_REQUIRED.to_string()));
    }

    profile.insert(config.partition_key.clone(), Value::String(user.to_string()));
    profile.insert(
        config.sort_key.clone(),
        Value::String(config.profile_sort_key.clone()),
    );

    store.put_item(encode_mapping(&profile))?;
    info!(user, fields = profile.len(), "profile saved");
    Ok(ApiResponse::ok_empty())
}
