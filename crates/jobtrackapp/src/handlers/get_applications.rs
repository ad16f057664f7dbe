use crate::attributes::decode_mapping;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::http::{ApiRequest, ApiResponse, APPLICATION_ID};
use crate::store::{ItemStore, SortCondition};
use tracing::debug;

use super::require_user;

/// List the user's applications, or fetch one when `Application-Id` is given.
pub fn run<S: ItemStore>(
    store: &S,
    config: &TrackerConfig,
    request: &ApiRequest,
) -> Result<ApiResponse> {
    let user = require_user(request)?;
    let application_id = request
        .query_param(APPLICATION_ID)
        .filter(|id| !id.is_empty());

    let condition = match application_id {
        Some(id) if config.is_profile_key(id) => {
            return Err(TrackerError::BadRequest(
                "Cannot query for profile applications using this endpoint. Use the /profiles endpoint instead."
                    .to_string(),
            ));
        }
        Some(id) => SortCondition::Equals(id.to_string()),
        None => SortCondition::BeginsWith(config.application_prefix.clone()),
    };
    debug!(user, ?condition, "querying applications");

    let items = store.query(user, &condition)?;
    if items.is_empty() {
        return Err(TrackerError::NotFound(format!(
            "No applications found for user: {user}"
        )));
    }

    let applications = items
        .iter()
        .map(decode_mapping)
        .collect::<Result<Vec<_>>>()?;
    ApiResponse::ok_json(&applications)
}
