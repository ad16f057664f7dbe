use crate::attributes::decode_mapping;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::http::{ApiRequest, ApiResponse, APPLICATION_ID};
use crate::store::{ItemKey, ItemStore};
use tracing::info;

/// Delete an application and return the removed record.
pub fn run<S: ItemStore>(
    store: &S,
    _config: &TrackerConfig,
    request: &ApiRequest,
) -> Result<ApiResponse> {
    let application_id = request
        .query_param(APPLICATION_ID)
        .or_else(|| request.query_param(&APPLICATION_ID.to_lowercase()))
        .filter(|id| !id.is_empty());

    let (user, application_id) = match (request.user_id(), application_id) {
        (Some(user), Some(id)) => (user, id),
        _ => {
            return Err(TrackerError::BadRequest(
                "User ID and Application ID must be provided.".to_string(),
            ))
        }
    };

    let key = ItemKey::new(user, application_id);
    let deleted = store
        .delete_item(&key)?
        .ok_or_else(|| TrackerError::NotFound("Application not found.".to_string()))?;
    info!(%key, "application deleted");

    ApiResponse::ok_json(&decode_mapping(&deleted)?)
}
