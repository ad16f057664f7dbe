//! # Handler Layer
//!
//! One module per record-access operation. Each handler performs at most one
//! store call and translates payloads with the attribute codec at the
//! boundary:
//!
//! - writes: JSON body → [`encode_mapping`](crate::attributes::encode_mapping) → `put_item`
//! - reads: `get_item` / `query` / `delete_item` → [`decode_mapping`](crate::attributes::decode_mapping) → JSON body
//!
//! ## Contract
//!
//! Every handler has the shape
//!
//! ```ignore
//! pub fn run<S: ItemStore>(store: &S, config: &TrackerConfig, request: &ApiRequest) -> Result<ApiResponse>
//! ```
//!
//! Handlers return `Err` for anything that is not a 200: validation failures
//! as [`TrackerError::BadRequest`], missing records as
//! [`TrackerError::NotFound`], store and decode failures as themselves. The
//! API facade turns those into status codes and attaches CORS headers.
//!
//! ## Handlers
//!
//! - [`get_profile`]: Read the user's profile record
//! - [`post_profile`]: Create or replace the profile record
//! - [`get_applications`]: List applications, or fetch one by id
//! - [`post_application`]: Create or replace an application
//! - [`delete_application`]: Remove an application, returning it

use crate::error::{Result, TrackerError};
use crate::http::{ApiRequest, USER_ID};
use serde_json::{Map, Value};

pub mod delete_application;
pub mod get_applications;
pub mod get_profile;
pub mod post_application;
pub mod post_profile;

const BODY_REQUIRED: &str = "Request body is required";

/// The authorizer's user id, or a 400.
pub(crate) fn require_user(request: &ApiRequest) -> Result<&str> {
    request
        .user_id()
        .ok_or_else(|| TrackerError::BadRequest(format!("{USER_ID} header is required")))
}

/// Parse the request body as a JSON object.
pub(crate) fn object_body(request: &ApiRequest) -> Result<Map<String, Value>> {
    let body = request
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| TrackerError::BadRequest(BODY_REQUIRED.to_string()))?;

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(TrackerError::BadRequest(
            "Invalid JSON format: expected a JSON object".to_string(),
        )),
        Err(e) => Err(TrackerError::BadRequest(format!("Invalid JSON format: {e}"))),
    }
}
